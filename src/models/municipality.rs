use serde::Serialize;

/// A municipality the interface can search, identified by its IBGE code.
#[derive(Debug, Clone, Serialize)]
pub struct Municipality {
    pub ibge_code: &'static str,
    pub name: &'static str,
    pub state_code: &'static str,
}

/// Municipalities currently covered by the gazette backend.
pub const MUNICIPALITIES: &[Municipality] = &[
    Municipality {
        ibge_code: "5208707",
        name: "Goiânia",
        state_code: "GO",
    },
    Municipality {
        ibge_code: "5201405",
        name: "Aparecida de Goiânia",
        state_code: "GO",
    },
];

/// Looks a municipality up by IBGE code.
pub fn find_municipality(ibge_code: &str) -> Option<&'static Municipality> {
    MUNICIPALITIES.iter().find(|m| m.ibge_code == ibge_code)
}

/// Technology investment categories the user can filter by. Each expands
/// into the keyword querystring sent to the gazette search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Robotica,
    Software,
}

impl Category {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "robotica" => Some(Self::Robotica),
            "software" => Some(Self::Software),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Robotica => "robotica",
            Self::Software => "software",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Robotica => "Robótica Educacional",
            Self::Software => "Software e Aplicativos",
        }
    }

    /// Keyword querystring for the gazette search endpoint.
    pub fn querystring(&self) -> &'static str {
        match self {
            Self::Robotica => "robótica educacional tecnologia ensino",
            Self::Software => "software aplicativo tecnologia digital educação",
        }
    }

    pub fn all() -> &'static [Category] {
        &[Self::Robotica, Self::Software]
    }
}
