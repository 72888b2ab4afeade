use serde::Deserialize;

/// Body of the aggregate `stats/` endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StatsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub materias_count: u64,
    #[serde(default)]
    pub notes_count: u64,
    #[serde(default)]
    pub alunos_online_count: u64,
    #[serde(default)]
    pub alunos_online: Vec<StudentEntry>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of the `online_students/` endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OnlineStudentsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub students: Vec<StudentEntry>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of the count-only endpoints (`materias_count/`, `notes_count/`).
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CountResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of the activity heartbeat (`ping/`).
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PingResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One online student as sent by either student-listing endpoint.
/// The aggregate endpoint sends `last_login`, the dedicated one `tempo_texto`.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct StudentEntry {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub tempo_texto: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
}
