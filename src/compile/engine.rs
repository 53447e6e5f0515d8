//! TeX engines accepted by the build service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CompileError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Pdflatex,
    Xelatex,
    Lualatex,
}

impl Engine {
    pub const ALL: [Engine; 3] = [Engine::Pdflatex, Engine::Xelatex, Engine::Lualatex];

    /// Canonical name, used both upstream and in the cache key.
    pub fn as_str(self) -> &'static str {
        match self {
            Engine::Pdflatex => "pdflatex",
            Engine::Xelatex => "xelatex",
            Engine::Lualatex => "lualatex",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Engine::ALL
            .into_iter()
            .find(|engine| engine.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                CompileError::Validation(format!(
                    "Unsupported engine '{wanted}', expected one of pdflatex, xelatex, lualatex"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_engine() {
        assert_eq!("pdflatex".parse::<Engine>().unwrap(), Engine::Pdflatex);
        assert_eq!(" XeLaTeX ".parse::<Engine>().unwrap(), Engine::Xelatex);
        assert!(matches!(
            "context".parse::<Engine>(),
            Err(CompileError::Validation(_))
        ));
    }

    #[test]
    fn test_default_engine() {
        assert_eq!(Engine::default(), Engine::Pdflatex);
        assert_eq!(Engine::Lualatex.to_string(), "lualatex");
    }
}
