use async_trait::async_trait;
use shared::{
    domain::{HelpOrder, HelpOrderId, StudentId},
    protocol::{HelpOrderAnswer, HelpOrderQuestion, ListQuery, Page},
};

use super::{
    controller::{ListController, ListResource},
    form::{FormErrors, SaveError},
    list::Listed,
};
use crate::{error::ClientError, GymApi};

pub const NEW_HELP_ORDER_LABEL: &str = "Novo pedido de auxílio";
pub const ANSWERED_LABEL: &str = "Respondido";
pub const UNANSWERED_LABEL: &str = "Não respondido";
pub const ADMIN_TITLE: &str = "Pedidos de auxílio";
pub const ANSWER_DIALOG_TITLE: &str = "Pergunta do aluno";
pub const ANSWER_SUCCESS: &str = "Resposta enviada com sucesso";
pub const ANSWER_FAILURE: &str = "Erro ao enviar resposta";
pub const QUESTION_SUCCESS: &str = "Pedido de auxílio enviado";
pub const QUESTION_FAILURE: &str = "Erro ao enviar pedido de auxílio";

/// Which help orders a list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpOrderScope {
    /// Every order a student asked, answered or not.
    Student(StudentId),
    /// Orders still waiting for staff.
    Unanswered,
}

pub type HelpOrdersPage = ListController<HelpOrder>;

impl Listed for HelpOrder {
    type Id = HelpOrderId;

    fn list_id(&self) -> HelpOrderId {
        self.id
    }
}

#[async_trait]
impl ListResource for HelpOrder {
    type Scope = HelpOrderScope;

    const EMPTY_PLACEHOLDER: &'static str = "Nenhum pedido de auxílio encontrado";

    async fn fetch(
        api: &dyn GymApi,
        scope: &HelpOrderScope,
        query: &ListQuery,
    ) -> Result<Page<Self>, ClientError> {
        match scope {
            HelpOrderScope::Student(student_id) => {
                api.list_student_help_orders(*student_id, query).await
            }
            HelpOrderScope::Unanswered => api.list_unanswered_help_orders(query).await,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpOrderBadge {
    pub label: &'static str,
    pub disabled: bool,
}

impl HelpOrderBadge {
    pub fn for_order(order: &HelpOrder) -> Self {
        if order.is_answered() {
            Self {
                label: ANSWERED_LABEL,
                disabled: false,
            }
        } else {
            Self {
                label: UNANSWERED_LABEL,
                disabled: true,
            }
        }
    }
}

/// Everything one list item shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpOrderCard {
    pub id: HelpOrderId,
    pub badge: HelpOrderBadge,
    pub time: String,
    pub question: String,
    pub answer: Option<String>,
}

impl From<&HelpOrder> for HelpOrderCard {
    fn from(order: &HelpOrder) -> Self {
        Self {
            id: order.id,
            badge: HelpOrderBadge::for_order(order),
            time: order.time.clone(),
            question: order.question.clone(),
            answer: order.answer.clone().filter(|_| order.is_answered()),
        }
    }
}

pub fn help_order_cards(orders: &[HelpOrder]) -> Vec<HelpOrderCard> {
    orders.iter().map(HelpOrderCard::from).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionForm {
    pub question: String,
}

impl QuestionForm {
    pub fn validate(&self) -> Result<HelpOrderQuestion, FormErrors> {
        let mut errors = FormErrors::default();
        let question = self.question.trim();
        if question.is_empty() {
            errors.add("question", "Escreva sua pergunta");
        }
        errors.into_result(|| HelpOrderQuestion {
            question: question.to_string(),
        })
    }

    pub async fn submit(
        &self,
        api: &dyn GymApi,
        student_id: StudentId,
    ) -> Result<HelpOrder, SaveError> {
        let payload = self.validate()?;
        Ok(api.create_help_order(student_id, &payload).await?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerForm {
    pub answer: String,
}

impl AnswerForm {
    pub fn validate(&self) -> Result<HelpOrderAnswer, FormErrors> {
        let mut errors = FormErrors::default();
        let answer = self.answer.trim();
        if answer.is_empty() {
            errors.add("answer", "Escreva uma resposta");
        }
        errors.into_result(|| HelpOrderAnswer {
            answer: answer.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(answer: Option<&str>) -> HelpOrder {
        HelpOrder {
            id: HelpOrderId(1),
            student_id: Some(StudentId(3)),
            question: "Devo comer batata doce logo cedo?".into(),
            answer: answer.map(str::to_string),
            time: "Há 2 horas".into(),
        }
    }

    #[test]
    fn answered_order_shows_enabled_badge() {
        let badge = HelpOrderBadge::for_order(&order(Some("Isso aí, de duas em duas horas.")));
        assert_eq!(badge.label, "Respondido");
        assert!(!badge.disabled);
    }

    #[test]
    fn unanswered_order_shows_disabled_badge() {
        let card = HelpOrderCard::from(&order(None));
        assert_eq!(card.badge.label, "Não respondido");
        assert!(card.badge.disabled);
        assert_eq!(card.time, "Há 2 horas");
        assert_eq!(card.answer, None);
    }

    #[test]
    fn blank_question_is_rejected() {
        let errors = QuestionForm {
            question: " \n".into(),
        }
        .validate()
        .expect_err("blank");
        assert_eq!(errors.get("question"), Some("Escreva sua pergunta"));
    }
}
