//! URL templates for the search and translate buttons.

use serde::{Deserialize, Serialize};

use crate::error::ActionError;

/// Placeholder replaced by the percent-encoded selection.
pub const TEXT_PLACEHOLDER: &str = "{text}";

pub const DEFAULT_SEARCH_URL: &str = "https://www.baidu.com/s?wd={text}";
pub const DEFAULT_TRANSLATE_URL: &str = "https://fanyi.baidu.com/#auto/zh/{text}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionUrls {
    pub search: String,
    pub translate: String,
}

impl Default for ActionUrls {
    fn default() -> Self {
        Self {
            search: DEFAULT_SEARCH_URL.to_string(),
            translate: DEFAULT_TRANSLATE_URL.to_string(),
        }
    }
}

impl ActionUrls {
    pub fn validate(&self) -> Result<(), ActionError> {
        for (name, template) in [("search", &self.search), ("translate", &self.translate)] {
            if !template.contains(TEXT_PLACEHOLDER) {
                return Err(ActionError::MissingPlaceholder {
                    name,
                    template: template.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn search_url(&self, text: &str) -> String {
        render(&self.search, text)
    }

    pub fn translate_url(&self, text: &str) -> String {
        render(&self.translate, text)
    }
}

fn render(template: &str, text: &str) -> String {
    template.replace(TEXT_PLACEHOLDER, &urlencoding::encode(text))
}
