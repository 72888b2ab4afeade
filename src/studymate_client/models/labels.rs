/// The three dashboard cards, keyed by their page id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKind {
    Subjects,
    OnlineStudents,
    Notes,
}

impl CardKind {
    pub const ALL: [CardKind; 3] = [CardKind::Subjects, CardKind::OnlineStudents, CardKind::Notes];

    pub fn key(self) -> &'static str {
        match self {
            CardKind::Subjects => "materias",
            CardKind::OnlineStudents => "alunos",
            CardKind::Notes => "notes",
        }
    }

    pub fn count_id(self) -> String {
        format!("{}-count", self.key())
    }

    pub fn label_id(self) -> String {
        format!("{}-label", self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountBucket {
    Zero,
    One,
    Many,
}

impl CountBucket {
    pub fn of(count: u64) -> Self {
        match count {
            0 => CountBucket::Zero,
            1 => CountBucket::One,
            _ => CountBucket::Many,
        }
    }
}

/// Card label phrasing per (card, count bucket).
#[derive(Debug, Clone)]
pub struct LabelTable {
    subjects: [&'static str; 3],
    online_students: [&'static str; 3],
    notes: [&'static str; 3],
}

impl Default for LabelTable {
    fn default() -> Self {
        Self {
            subjects: [
                "Nenhuma matéria cadastrada",
                "Matéria disponível",
                "Matérias disponíveis",
            ],
            online_students: [
                "Nenhum aluno online",
                "Estudante online",
                "Estudantes online",
            ],
            notes: [
                "Nenhum note criado",
                "Note compartilhado",
                "Notes compartilhados",
            ],
        }
    }
}

impl LabelTable {
    pub fn label(&self, card: CardKind, count: u64) -> &'static str {
        let row = match card {
            CardKind::Subjects => &self.subjects,
            CardKind::OnlineStudents => &self.online_students,
            CardKind::Notes => &self.notes,
        };
        match CountBucket::of(count) {
            CountBucket::Zero => row[0],
            CountBucket::One => row[1],
            CountBucket::Many => row[2],
        }
    }
}
