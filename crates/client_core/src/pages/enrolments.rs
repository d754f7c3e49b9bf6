//! Enrolments screens. The form previews the end date and the total price
//! from the selected plan; the backend stays authoritative for both.

use async_trait::async_trait;
use chrono::{Months, NaiveDate};
use shared::{
    domain::{Enrolment, EnrolmentId, Plan, PlanId, Student, StudentId},
    protocol::{EnrolmentPayload, ListQuery, Page},
};

use super::{
    controller::{DeletableResource, ListResource},
    form::FormErrors,
    list::Listed,
};
use crate::{error::ClientError, GymApi};

pub const TITLE: &str = "Gerenciando matrículas";
pub const ADD_LABEL: &str = "CADASTRAR";
pub const FILTER_PLACEHOLDER: &str = "Buscar aluno";
pub const COLUMNS: [&str; 5] = ["ALUNO", "PLANO", "INÍCIO", "TÉRMINO", "ATIVA"];
pub const SAVE_SUCCESS: &str = "Matrícula salva com sucesso";
pub const SAVE_FAILURE: &str = "Erro ao salvar matrícula";

/// How many students the form selector offers per search.
const STUDENT_OPTIONS_LIMIT: u32 = 50;

impl Listed for Enrolment {
    type Id = EnrolmentId;

    fn list_id(&self) -> EnrolmentId {
        self.id
    }
}

#[async_trait]
impl ListResource for Enrolment {
    type Scope = ();

    const EMPTY_PLACEHOLDER: &'static str = "Nenhuma matrícula encontrada";

    async fn fetch(
        api: &dyn GymApi,
        _scope: &(),
        query: &ListQuery,
    ) -> Result<Page<Self>, ClientError> {
        api.list_enrolments(query).await
    }
}

#[async_trait]
impl DeletableResource for Enrolment {
    const DELETE_TITLE: &'static str = "Apagar matrícula";
    const DELETE_SUCCESS: &'static str = "Matrícula deletada com sucesso";
    const DELETE_FAILURE: &'static str = "Erro ao deletar matrícula";

    fn delete_prompt(&self) -> String {
        format!(
            "Tem certeza que deseja apagar a matrícula de {} ?",
            student_label(self)
        )
    }

    async fn delete(api: &dyn GymApi, id: EnrolmentId) -> Result<(), ClientError> {
        api.delete_enrolment(id).await
    }
}

fn student_label(enrolment: &Enrolment) -> String {
    enrolment
        .student
        .as_ref()
        .map(|student| student.name.clone())
        .unwrap_or_else(|| format!("aluno #{}", enrolment.student_id))
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Formats an amount in reais, e.g. `R$ 1.308,00`.
pub fn format_price(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    format!("{sign}R$ {grouped},{:02}", cents % 100)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolmentRow {
    pub id: EnrolmentId,
    pub student: String,
    pub plan: String,
    pub start: String,
    pub end: String,
    pub active: bool,
}

impl From<&Enrolment> for EnrolmentRow {
    fn from(enrolment: &Enrolment) -> Self {
        Self {
            id: enrolment.id,
            student: student_label(enrolment),
            plan: enrolment
                .plan
                .as_ref()
                .map(|plan| plan.title.clone())
                .unwrap_or_else(|| format!("plano #{}", enrolment.plan_id)),
            start: format_date(enrolment.start_date),
            end: format_date(enrolment.end_date),
            active: enrolment.active,
        }
    }
}

pub fn enrolment_rows(enrolments: &[Enrolment]) -> Vec<EnrolmentRow> {
    enrolments.iter().map(EnrolmentRow::from).collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnrolmentQuote {
    pub end_date: NaiveDate,
    pub total_price: f64,
}

impl EnrolmentQuote {
    pub fn for_plan(plan: &Plan, start_date: NaiveDate) -> Option<Self> {
        let end_date = start_date.checked_add_months(Months::new(plan.duration))?;
        Some(Self {
            end_date,
            total_price: plan.total_price(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrolmentForm {
    pub student_id: Option<StudentId>,
    pub plan_id: Option<PlanId>,
    pub start_date: String,
}

impl EnrolmentForm {
    pub fn from_enrolment(enrolment: &Enrolment) -> Self {
        Self {
            student_id: Some(enrolment.student_id),
            plan_id: Some(enrolment.plan_id),
            start_date: format_date(enrolment.start_date),
        }
    }

    pub fn selected_plan<'a>(&self, plans: &'a [Plan]) -> Option<&'a Plan> {
        let plan_id = self.plan_id?;
        plans.iter().find(|plan| plan.id == plan_id)
    }

    /// End date and total price for the current selection, once both a plan
    /// and a parseable start date are present.
    pub fn quote(&self, plans: &[Plan]) -> Option<EnrolmentQuote> {
        let plan = self.selected_plan(plans)?;
        EnrolmentQuote::for_plan(plan, parse_date(&self.start_date)?)
    }

    pub fn validate(&self, plans: &[Plan]) -> Result<EnrolmentPayload, FormErrors> {
        let mut errors = FormErrors::default();

        if self.student_id.is_none() {
            errors.add("student_id", "Selecione um aluno");
        }
        match self.plan_id {
            None => errors.add("plan_id", "Selecione um plano"),
            Some(_) if self.selected_plan(plans).is_none() => {
                errors.add("plan_id", "Plano não encontrado")
            }
            Some(_) => {}
        }
        let start_date = if self.start_date.trim().is_empty() {
            errors.add("start_date", "A data de início é obrigatória");
            None
        } else {
            let parsed = parse_date(&self.start_date);
            if parsed.is_none() {
                errors.add("start_date", "Use o formato dd/mm/aaaa");
            }
            parsed
        };

        match (self.student_id, self.plan_id, start_date) {
            (Some(student_id), Some(plan_id), Some(start_date)) if errors.is_empty() => {
                Ok(EnrolmentPayload {
                    student_id,
                    plan_id,
                    start_date,
                })
            }
            _ => Err(errors),
        }
    }
}

pub async fn save(
    api: &dyn GymApi,
    editing: Option<EnrolmentId>,
    payload: &EnrolmentPayload,
) -> Result<Enrolment, ClientError> {
    match editing {
        Some(id) => api.update_enrolment(id, payload).await,
        None => api.create_enrolment(payload).await,
    }
}

/// Choices offered by the enrolment form selectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrolmentFormOptions {
    pub students: Vec<Student>,
    pub plans: Vec<Plan>,
}

impl EnrolmentFormOptions {
    /// Loads the student candidates matching `student_filter` and every plan,
    /// both requests in flight at once.
    pub async fn load(api: &dyn GymApi, student_filter: &str) -> Result<Self, ClientError> {
        let (students, plans) = futures::try_join!(
            Self::search_students(api, student_filter),
            api.list_plans()
        )?;
        Ok(Self { students, plans })
    }

    /// Asks the backend for the first students whose name matches `filter`,
    /// so the selector can reach students beyond the initial batch.
    pub async fn search_students(
        api: &dyn GymApi,
        filter: &str,
    ) -> Result<Vec<Student>, ClientError> {
        let query = ListQuery::new(1, STUDENT_OPTIONS_LIMIT, filter.trim());
        Ok(api.list_students(&query).await?.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gold() -> Plan {
        Plan {
            id: PlanId(2),
            title: "Gold".into(),
            duration: 3,
            price: 109.0,
        }
    }

    #[test]
    fn quote_adds_plan_months_to_start_date() {
        let form = EnrolmentForm {
            student_id: Some(StudentId(1)),
            plan_id: Some(PlanId(2)),
            start_date: "31/01/2024".into(),
        };
        let quote = form.quote(&[gold()]).expect("quote");
        assert_eq!(
            quote.end_date,
            NaiveDate::from_ymd_opt(2024, 4, 30).expect("date")
        );
        assert_eq!(format_price(quote.total_price), "R$ 327,00");
    }

    #[test]
    fn quote_needs_plan_and_date() {
        let mut form = EnrolmentForm {
            plan_id: Some(PlanId(2)),
            ..EnrolmentForm::default()
        };
        assert_eq!(form.quote(&[gold()]), None);
        form.start_date = "2024-02-01".into();
        assert!(form.quote(&[gold()]).is_some());
        assert_eq!(form.quote(&[]), None);
    }

    #[test]
    fn validate_requires_every_field() {
        let errors = EnrolmentForm::default()
            .validate(&[gold()])
            .expect_err("empty form");
        assert!(errors.get("student_id").is_some());
        assert!(errors.get("plan_id").is_some());
        assert!(errors.get("start_date").is_some());

        let form = EnrolmentForm {
            student_id: Some(StudentId(1)),
            plan_id: Some(PlanId(2)),
            start_date: "32/13/2024".into(),
        };
        let errors = form.validate(&[gold()]).expect_err("bad date");
        assert_eq!(errors.get("start_date"), Some("Use o formato dd/mm/aaaa"));
    }

    #[test]
    fn formats_prices_in_reais() {
        assert_eq!(format_price(0.0), "R$ 0,00");
        assert_eq!(format_price(1308.0), "R$ 1.308,00");
        assert_eq!(format_price(1234567.891), "R$ 1.234.567,89");
    }
}
