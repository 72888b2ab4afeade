use crate::studymate_client::api::StatsResponse;
use crate::types::DashboardError;

use super::{CardKind, OnlineStudent};

/// Latest decoded aggregate counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub subjects: u64,
    pub notes: u64,
    pub online_students: u64,
    pub students: Vec<OnlineStudent>,
}

impl StatsSnapshot {
    /// Accepts only responses flagged successful by the server.
    pub fn from_response(response: &StatsResponse) -> Result<Self, DashboardError> {
        if !response.success {
            return Err(DashboardError::Api(
                response
                    .error
                    .clone()
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        Ok(Self {
            subjects: response.materias_count,
            notes: response.notes_count,
            online_students: response.alunos_online_count,
            students: response
                .alunos_online
                .iter()
                .map(OnlineStudent::from_entry)
                .collect(),
        })
    }

    pub fn count(&self, card: CardKind) -> u64 {
        match card {
            CardKind::Subjects => self.subjects,
            CardKind::OnlineStudents => self.online_students,
            CardKind::Notes => self.notes,
        }
    }
}
