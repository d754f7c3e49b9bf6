//! Modal confirmation bound to the parameters of the action it guards.

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmDialog<P> {
    title: String,
    description: String,
    params: Option<P>,
}

impl<P> Default for ConfirmDialog<P> {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            params: None,
        }
    }
}

impl<P> ConfirmDialog<P> {
    pub fn open(&mut self, title: impl Into<String>, description: impl Into<String>, params: P) {
        self.title = title.into();
        self.description = description.into();
        self.params = Some(params);
    }

    pub fn is_open(&self) -> bool {
        self.params.is_some()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Closes the dialog and hands back the bound parameters. A closed dialog
    /// yields `None`, so a double confirm can never fire the action twice.
    pub fn confirm(&mut self) -> Option<P> {
        self.params.take()
    }

    pub fn cancel(&mut self) {
        self.params = None;
    }
}
