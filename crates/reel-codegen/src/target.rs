use crate::generator::CodegenError;
use crate::literal::{python_test_name, sanitize_identifier};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Browser automation library the generated test drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    #[serde(alias = "pw")]
    Playwright,
    #[serde(alias = "pptr")]
    Puppeteer,
    #[serde(alias = "webdriver")]
    Selenium,
}

/// Source language of the generated test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[serde(alias = "ts")]
    TypeScript,
    #[serde(alias = "js")]
    JavaScript,
    #[serde(alias = "py")]
    Python,
}

impl Framework {
    pub const ALL: [Framework; 3] = [
        Framework::Playwright,
        Framework::Puppeteer,
        Framework::Selenium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Playwright => "playwright",
            Framework::Puppeteer => "puppeteer",
            Framework::Selenium => "selenium",
        }
    }
}

impl Language {
    pub const ALL: [Language; 3] = [Language::TypeScript, Language::JavaScript, Language::Python];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Python => "python",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Language::TypeScript => "ts",
            Language::JavaScript => "js",
            Language::Python => "py",
        }
    }

    /// TypeScript gets type annotations where the framework exports types.
    pub fn is_typed(&self) -> bool {
        matches!(self, Language::TypeScript)
    }
}

impl FromStr for Framework {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "playwright" | "pw" => Ok(Framework::Playwright),
            "puppeteer" | "pptr" => Ok(Framework::Puppeteer),
            "selenium" | "webdriver" => Ok(Framework::Selenium),
            _ => Err(CodegenError::UnknownFramework(s.to_string())),
        }
    }
}

impl FromStr for Language {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Language::TypeScript),
            "javascript" | "js" => Ok(Language::JavaScript),
            "python" | "py" => Ok(Language::Python),
            _ => Err(CodegenError::UnknownLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conventional output file name for a session rendered with the given target.
pub fn default_file_name(session_name: &str, framework: Framework, language: Language) -> String {
    let ident = sanitize_identifier(session_name);
    match (framework, language) {
        (_, Language::Python) => format!("{}.py", python_test_name(&ident)),
        (Framework::Playwright, lang) => format!("{}.spec.{}", ident, lang.extension()),
        (_, lang) => format!("{}.{}", ident, lang.extension()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("PW".parse::<Framework>().unwrap(), Framework::Playwright);
        assert_eq!(" webdriver ".parse::<Framework>().unwrap(), Framework::Selenium);
        assert_eq!("ts".parse::<Language>().unwrap(), Language::TypeScript);
        assert_eq!("Python".parse::<Language>().unwrap(), Language::Python);
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            "cypress".parse::<Framework>(),
            Err(CodegenError::UnknownFramework(name)) if name == "cypress"
        ));
        assert!(matches!(
            "ruby".parse::<Language>(),
            Err(CodegenError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn test_default_file_names() {
        assert_eq!(
            default_file_name("login flow", Framework::Playwright, Language::TypeScript),
            "login_flow.spec.ts"
        );
        assert_eq!(
            default_file_name("login", Framework::Puppeteer, Language::JavaScript),
            "login.js"
        );
        assert_eq!(
            default_file_name("login", Framework::Selenium, Language::Python),
            "test_login.py"
        );
        assert_eq!(
            default_file_name("", Framework::Playwright, Language::JavaScript),
            "recorded_test.spec.js"
        );
    }
}
