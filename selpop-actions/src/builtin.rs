//! Copy, search and translate.

use selpop_core::{Action, ActionHandler, ActionRegistry, PopupError};

use crate::clipboard::ClipboardSink;
use crate::opener::UrlOpener;
use crate::urls::ActionUrls;

pub struct CopyAction<C> {
    clipboard: C,
}

impl<C: ClipboardSink> CopyAction<C> {
    pub fn new(clipboard: C) -> Self {
        Self { clipboard }
    }
}

impl<C: ClipboardSink> ActionHandler for CopyAction<C> {
    fn invoke(&self, text: &str) -> anyhow::Result<()> {
        self.clipboard.set_text(text)?;
        tracing::debug!(chars = text.chars().count(), "copied selection");
        Ok(())
    }
}

pub struct SearchAction<O> {
    urls: ActionUrls,
    opener: O,
}

impl<O: UrlOpener> SearchAction<O> {
    pub fn new(urls: ActionUrls, opener: O) -> Self {
        Self { urls, opener }
    }
}

impl<O: UrlOpener> ActionHandler for SearchAction<O> {
    fn invoke(&self, text: &str) -> anyhow::Result<()> {
        self.opener.open(&self.urls.search_url(text))?;
        Ok(())
    }
}

pub struct TranslateAction<O> {
    urls: ActionUrls,
    opener: O,
}

impl<O: UrlOpener> TranslateAction<O> {
    pub fn new(urls: ActionUrls, opener: O) -> Self {
        Self { urls, opener }
    }
}

impl<O: UrlOpener> ActionHandler for TranslateAction<O> {
    fn invoke(&self, text: &str) -> anyhow::Result<()> {
        self.opener.open(&self.urls.translate_url(text))?;
        Ok(())
    }
}

/// The default buttons, in order: copy, search, translate.
pub fn builtin_registry<C, O>(
    urls: ActionUrls,
    clipboard: C,
    opener: O,
) -> Result<ActionRegistry, PopupError>
where
    C: ClipboardSink + 'static,
    O: UrlOpener + Clone + 'static,
{
    urls.validate()
        .map_err(|e| PopupError::InvalidOptions(e.to_string()))?;

    let mut registry = ActionRegistry::new();
    registry.register(
        Action::with_handler("copy", "复制", CopyAction::new(clipboard))
            .with_description("Copy the selection to the clipboard"),
    )?;
    registry.register(
        Action::with_handler("search", "搜索", SearchAction::new(urls.clone(), opener.clone()))
            .with_description("Search the web for the selection"),
    )?;
    registry.register(
        Action::with_handler("translate", "翻译", TranslateAction::new(urls, opener))
            .with_description("Translate the selection"),
    )?;
    Ok(registry)
}
