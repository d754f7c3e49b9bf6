//! Students screens: the filterable list and the create/edit form.

use async_trait::async_trait;
use email_address::EmailAddress;
use shared::{
    domain::{Student, StudentId},
    protocol::{ListQuery, Page, StudentPayload},
};

use super::{
    controller::{DeletableResource, ListResource},
    form::FormErrors,
    list::Listed,
};
use crate::{error::ClientError, GymApi};

pub const TITLE: &str = "Gerenciando alunos";
pub const ADD_LABEL: &str = "CADASTRAR";
pub const FILTER_PLACEHOLDER: &str = "Buscar aluno";
pub const COLUMNS: [&str; 3] = ["NOME", "EMAIL", "IDADE"];
pub const SAVE_SUCCESS: &str = "Aluno salvo com sucesso";
pub const SAVE_FAILURE: &str = "Erro ao salvar aluno";

impl Listed for Student {
    type Id = StudentId;

    fn list_id(&self) -> StudentId {
        self.id
    }
}

#[async_trait]
impl ListResource for Student {
    type Scope = ();

    const EMPTY_PLACEHOLDER: &'static str = "Nenhum aluno encontrado";

    async fn fetch(
        api: &dyn GymApi,
        _scope: &(),
        query: &ListQuery,
    ) -> Result<Page<Self>, ClientError> {
        api.list_students(query).await
    }
}

#[async_trait]
impl DeletableResource for Student {
    const DELETE_TITLE: &'static str = "Apagar aluno";
    const DELETE_SUCCESS: &'static str = "Aluno deletado com sucesso";
    const DELETE_FAILURE: &'static str = "Erro ao deletar aluno";

    fn delete_prompt(&self) -> String {
        format!("Tem certeza que deseja apagar o aluno {} ?", self.name)
    }

    async fn delete(api: &dyn GymApi, id: StudentId) -> Result<(), ClientError> {
        api.delete_student(id).await
    }
}

/// Display cells of one table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    pub age: String,
}

impl From<&Student> for StudentRow {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            name: student.name.clone(),
            email: student.email.clone(),
            age: student.age.to_string(),
        }
    }
}

pub fn student_rows(students: &[Student]) -> Vec<StudentRow> {
    students.iter().map(StudentRow::from).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub name: String,
    pub email: String,
    pub age: String,
}

impl StudentForm {
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            email: student.email.clone(),
            age: student.age.to_string(),
        }
    }

    pub fn validate(&self) -> Result<StudentPayload, FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "O nome é obrigatório");
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", "O e-mail é obrigatório");
        } else if !EmailAddress::is_valid(email) {
            errors.add("email", "Insira um e-mail válido");
        }

        let age = match self.age.trim().parse::<u32>() {
            Ok(age) if age > 0 => age,
            _ => {
                errors.add("age", "A idade deve ser um número positivo");
                0
            }
        };

        errors.into_result(|| StudentPayload {
            name: name.to_string(),
            email: email.to_string(),
            age,
        })
    }
}

/// Creates the student, or updates it when `editing` names an existing one.
pub async fn save(
    api: &dyn GymApi,
    editing: Option<StudentId>,
    payload: &StudentPayload,
) -> Result<Student, ClientError> {
    match editing {
        Some(id) => api.update_student(id, payload).await,
        None => api.create_student(payload).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_render_student_cells() {
        let rows = student_rows(&[Student {
            id: StudentId(1),
            name: "Ana".into(),
            email: "a@x.com".into(),
            age: 20,
        }]);
        assert_eq!(rows.len(), 1);
        assert_eq!(
            (rows[0].name.as_str(), rows[0].email.as_str(), rows[0].age.as_str()),
            ("Ana", "a@x.com", "20")
        );
    }

    #[test]
    fn form_reports_each_invalid_field() {
        let form = StudentForm {
            name: "  ".into(),
            email: "not-an-email".into(),
            age: "-3".into(),
        };
        let errors = form.validate().expect_err("invalid form");
        assert!(errors.get("name").is_some());
        assert_eq!(errors.get("email"), Some("Insira um e-mail válido"));
        assert!(errors.get("age").is_some());
    }

    #[test]
    fn form_trims_valid_input() {
        let form = StudentForm {
            name: " Ana Souza ".into(),
            email: "ana@gympoint.com ".into(),
            age: "27".into(),
        };
        assert_eq!(
            form.validate().expect("valid form"),
            StudentPayload {
                name: "Ana Souza".into(),
                email: "ana@gympoint.com".into(),
                age: 27,
            }
        );
    }

    #[test]
    fn delete_prompt_names_the_student() {
        let student = Student {
            id: StudentId(5),
            name: "Bia".into(),
            email: "b@x.com".into(),
            age: 31,
        };
        assert_eq!(
            student.delete_prompt(),
            "Tem certeza que deseja apagar o aluno Bia ?"
        );
    }
}
