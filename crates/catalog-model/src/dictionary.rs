//! Enum dictionaries for the catalog's coded columns.
//!
//! The legacy catalog stores two categorical columns as small integers:
//!
//! - **language**: a flat code table shared by every book
//! - **subarea**: a code table scoped by the book's `area`, so the same code
//!   means different things in different areas (`3` is "Álgebra Linear" under
//!   Matemática but "Termodinâmica" under Física)
//!
//! Lookups return `Option`; a missing key is a miss for the caller to record,
//! never an error raised here.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical book languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    Portuguese,
    English,
    Spanish,
    Other,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Portuguese,
        Language::English,
        Language::Spanish,
        Language::Other,
    ];

    /// Legacy integer code stored in the catalog export.
    pub fn code(self) -> u32 {
        match self {
            Language::Portuguese => 1,
            Language::English => 2,
            Language::Spanish => 3,
            Language::Other => 4,
        }
    }

    /// Canonical label written to the migrated catalog.
    pub fn label(self) -> &'static str {
        match self {
            Language::Portuguese => "Português",
            Language::English => "Inglês",
            Language::Spanish => "Espanhol",
            Language::Other => "Outro",
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|language| language.code() == code)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|language| language.label() == label)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Top-level subject areas that scope the subarea dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Area {
    Mathematics,
    Physics,
    Chemistry,
    Biology,
    Computing,
    Miscellaneous,
}

const MATHEMATICS: &[(u32, &str)] = &[
    (1, "Cálculo"),
    (2, "Geometria Analítica"),
    (3, "Álgebra Linear"),
    (4, "Análise"),
    (5, "Álgebra Abstrata"),
    (6, "Topologia e Geometria"),
    (7, "Lógica e Fundamentos"),
    (8, "Equações Diferenciais"),
    (9, "Funções Complexas"),
];

const PHYSICS: &[(u32, &str)] = &[
    (1, "Física Geral"),
    (2, "Mecânica"),
    (3, "Termodinâmica"),
    (4, "Eletromagnetismo"),
    (5, "Física Moderna"),
    (6, "Física Matemática"),
    (7, "Astronomia e Astrofísica"),
];

const CHEMISTRY: &[(u32, &str)] = &[
    (1, "Química Geral"),
    (2, "Fisico-Química"),
    (3, "Química Inorgânica"),
    (4, "Química Orgânica"),
    (5, "Química Experimental"),
];

const BIOLOGY: &[(u32, &str)] = &[
    (1, "Bioquímica"),
    (2, "Biologia Molecular e Celular"),
    (3, "Genética e Evolução"),
    (4, "Biologia de Sistemas"),
    (5, "Desenvolvimento"),
    (6, "Ecologia"),
    (7, "Botânica"),
];

const COMPUTING: &[(u32, &str)] = &[
    (1, "Fundamentos de Computação"),
    (2, "Algoritmos e Estruturas de Dados"),
    (3, "Análise Numérica"),
    (4, "Probabilidade e Estatística"),
    (5, "Teoria da Computação"),
    (6, "Programação"),
    (7, "Sistemas e Redes"),
];

const MISCELLANEOUS: &[(u32, &str)] = &[
    (1, "Divulgação Científica"),
    (2, "História e Filosofia da Ciência"),
    (3, "Interdisciplinares"),
    (4, "Literatura"),
];

impl Area {
    pub const ALL: [Area; 6] = [
        Area::Mathematics,
        Area::Physics,
        Area::Chemistry,
        Area::Biology,
        Area::Computing,
        Area::Miscellaneous,
    ];

    /// Area name exactly as it appears in the catalog.
    pub fn as_str(self) -> &'static str {
        match self {
            Area::Mathematics => "Matemática",
            Area::Physics => "Física",
            Area::Chemistry => "Química",
            Area::Biology => "Biologia",
            Area::Computing => "Computação",
            Area::Miscellaneous => "Variados",
        }
    }

    /// Exact, case-sensitive match against the catalog spelling.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|area| area.as_str() == value)
    }

    /// Code table for this area, ordered by code.
    pub fn subareas(self) -> &'static [(u32, &'static str)] {
        match self {
            Area::Mathematics => MATHEMATICS,
            Area::Physics => PHYSICS,
            Area::Chemistry => CHEMISTRY,
            Area::Biology => BIOLOGY,
            Area::Computing => COMPUTING,
            Area::Miscellaneous => MISCELLANEOUS,
        }
    }

    pub fn subarea(self, code: u32) -> Option<&'static str> {
        self.subareas()
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, name)| *name)
    }

    pub fn has_subarea(self, name: &str) -> bool {
        self.subareas().iter().any(|(_, candidate)| *candidate == name)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a raw dictionary code.
///
/// Accepts plain integers and the `"3.0"` form spreadsheet tools produce for
/// integer columns with gaps. Anything else is not a code.
pub fn parse_code(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u32>()
        .ok()
        .or_else(|| trimmed.strip_suffix(".0")?.parse::<u32>().ok())
}

/// Look up a language by its raw code.
pub fn language_for_code(raw: &str) -> Option<Language> {
    parse_code(raw).and_then(Language::from_code)
}

/// Two-level subarea lookup: area name first, then the code within that area.
pub fn subarea_for_code(area: &str, raw: &str) -> Option<&'static str> {
    let area = Area::parse(area)?;
    area.subarea(parse_code(raw)?)
}
