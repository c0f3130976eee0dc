/// Option-list model behind the booking form's time dropdown.
///
/// An option's value doubles as its display text, so options are stored
/// as plain strings. The preferred marker records a previously chosen
/// time (set by the embedding form, e.g. when an existing booking is
/// being edited) and is consulted after every rebuild to restore the
/// selection.
#[derive(Debug, Clone, Default)]
pub struct TimeControl {
    options: Vec<String>,
    selected: Option<usize>,
    preferred: Option<String>,
}

impl TimeControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferred(preferred: impl Into<String>) -> Self {
        Self {
            preferred: Some(preferred.into()),
            ..Self::default()
        }
    }

    /// Replace the whole option set and restore the preferred selection.
    ///
    /// Previous options never survive a rebuild. The new list keeps the
    /// order it was handed in. Selection lands on the option equal to the
    /// preferred marker, or nowhere when the marker is unset or no longer
    /// offered.
    pub fn rebuild(&mut self, slots: Vec<String>) {
        self.options = slots;
        self.selected = self
            .preferred
            .as_ref()
            .and_then(|time| self.options.iter().position(|option| option == time));
    }

    /// The marker's lifecycle belongs to the embedding form; the control
    /// only reads it during rebuilds.
    pub fn set_preferred(&mut self, preferred: Option<String>) {
        self.preferred = preferred;
    }

    pub fn preferred(&self) -> Option<&str> {
        self.preferred.as_deref()
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Value of the currently selected option, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected.map(|index| self.options[index].as_str())
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
