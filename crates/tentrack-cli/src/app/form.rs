//! Create/edit form state.

use chrono::NaiveDate;
use tentrack_core::tent::{parse_capacity, parse_inspection_date};
use tentrack_core::{NewTent, Tent, TentPatch, TentStatus};

use crate::sync::MutationRequest;

/// Focusable form fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Model,
    Capacity,
    Status,
    LastInspected,
    Location,
    Condition,
    MissingItems,
    DamagedItems,
}

impl FormField {
    pub const ALL: [Self; 9] = [
        Self::Name,
        Self::Model,
        Self::Capacity,
        Self::Status,
        Self::LastInspected,
        Self::Location,
        Self::Condition,
        Self::MissingItems,
        Self::DamagedItems,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Model => "Model",
            Self::Capacity => "Capacity",
            Self::Status => "Status",
            Self::LastInspected => "Last inspected",
            Self::Location => "Location",
            Self::Condition => "Condition",
            Self::MissingItems => "Missing items",
            Self::DamagedItems => "Damaged items",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub const fn is_item_list(self) -> bool {
        matches!(self, Self::MissingItems | Self::DamagedItems)
    }
}

/// A list of item descriptions with an entry line for adding more.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemListEditor {
    pub items: Vec<String>,
    /// Text typed but not yet added.
    pub entry: String,
    /// Highlighted item, target of removal.
    pub selected: Option<usize>,
}

impl ItemListEditor {
    pub fn with_items(items: &[String]) -> Self {
        Self {
            items: items.to_vec(),
            ..Self::default()
        }
    }

    /// Add the trimmed entry text as an item. Blank entries are ignored.
    pub fn add_entry(&mut self) -> bool {
        let item = self.entry.trim();
        if item.is_empty() {
            return false;
        }
        self.items.push(item.to_string());
        self.entry.clear();
        true
    }

    /// Remove the item at `index`, keeping the highlight in range.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        self.selected = match self.selected {
            _ if self.items.is_empty() => None,
            Some(sel) => Some(sel.min(self.items.len() - 1)),
            None => None,
        };
        Some(removed)
    }

    pub fn remove_selected(&mut self) -> Option<String> {
        self.selected.and_then(|i| self.remove(i))
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(self.items.len() - 1)));
    }

    pub fn select_prev(&mut self) {
        self.selected = match self.selected {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }
}

/// A validation problem attached to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// Form contents. Numeric and date fields are kept as typed text until submit.
#[derive(Debug, Clone)]
pub struct TentForm {
    /// The tent being edited, `None` when creating.
    pub editing: Option<Tent>,
    pub name: String,
    pub model: String,
    pub capacity: String,
    pub status: TentStatus,
    pub condition: String,
    pub last_inspected: String,
    pub location: String,
    pub missing: ItemListEditor,
    pub damaged: ItemListEditor,
    pub focus: FormField,
    pub errors: Vec<FieldError>,
}

impl TentForm {
    /// Empty form for a new tent: capacity 2, inspected `today`.
    pub fn create(today: NaiveDate) -> Self {
        Self {
            editing: None,
            name: String::new(),
            model: String::new(),
            capacity: "2".to_string(),
            status: TentStatus::Good,
            condition: String::new(),
            last_inspected: today.format("%Y-%m-%d").to_string(),
            location: String::new(),
            missing: ItemListEditor::default(),
            damaged: ItemListEditor::default(),
            focus: FormField::Name,
            errors: Vec::new(),
        }
    }

    /// Form prefilled from an existing tent.
    pub fn edit(tent: &Tent) -> Self {
        Self {
            editing: Some(tent.clone()),
            name: tent.name.clone(),
            model: tent.model.clone(),
            capacity: format_capacity(tent.capacity),
            status: tent.status,
            condition: tent.condition.clone(),
            last_inspected: tent.last_inspected.format("%Y-%m-%d").to_string(),
            location: tent.location.clone(),
            missing: ItemListEditor::with_items(&tent.missing_items),
            damaged: ItemListEditor::with_items(&tent.damaged_items),
            focus: FormField::Name,
            errors: Vec::new(),
        }
    }

    pub const fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub const fn title(&self) -> &'static str {
        if self.is_edit() { "Edit Tent" } else { "Add New Tent" }
    }

    pub fn error_for(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Item editor behind the focused field, if any.
    pub fn focused_list(&mut self) -> Option<&mut ItemListEditor> {
        match self.focus {
            FormField::MissingItems => Some(&mut self.missing),
            FormField::DamagedItems => Some(&mut self.damaged),
            _ => None,
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::Model => Some(&mut self.model),
            FormField::Capacity => Some(&mut self.capacity),
            FormField::LastInspected => Some(&mut self.last_inspected),
            FormField::Location => Some(&mut self.location),
            FormField::Condition => Some(&mut self.condition),
            FormField::MissingItems => Some(&mut self.missing.entry),
            FormField::DamagedItems => Some(&mut self.damaged.entry),
            FormField::Status => None,
        }
    }

    /// Type a character into the focused field.
    pub fn input_char(&mut self, c: char) {
        if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    pub const fn cycle_status(&mut self, forward: bool) {
        self.status = if forward {
            self.status.next()
        } else {
            self.status.prev()
        };
    }

    /// Check every field; on success return the editable fields as a [`NewTent`].
    pub fn validate(&self) -> Result<NewTent, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut require = |field: FormField, value: &str| {
            if value.trim().is_empty() {
                errors.push(FieldError {
                    field,
                    message: format!("{} is required", field.label()),
                });
            }
        };
        require(FormField::Name, &self.name);
        require(FormField::Model, &self.model);
        require(FormField::Location, &self.location);

        let capacity = parse_capacity(&self.capacity).map_err(|e| FieldError {
            field: FormField::Capacity,
            message: e.to_string(),
        });
        let last_inspected = parse_inspection_date(&self.last_inspected).map_err(|e| FieldError {
            field: FormField::LastInspected,
            message: e.to_string(),
        });

        match (capacity, last_inspected) {
            (Ok(capacity), Ok(last_inspected)) if errors.is_empty() => Ok(NewTent {
                name: self.name.trim().to_string(),
                model: self.model.trim().to_string(),
                capacity,
                status: self.status,
                condition: self.condition.trim().to_string(),
                last_inspected,
                missing_items: self.missing.items.clone(),
                damaged_items: self.damaged.items.clone(),
                location: self.location.trim().to_string(),
            }),
            (capacity, last_inspected) => {
                errors.extend(capacity.err());
                errors.extend(last_inspected.err());
                Err(errors)
            }
        }
    }

    /// Validate and build the request this form submits.
    ///
    /// Editing sends every editable field, merged over the original record.
    /// On failure the errors are kept on the form for inline display.
    pub fn submit(&mut self) -> Option<MutationRequest> {
        match self.validate() {
            Ok(new) => {
                self.errors.clear();
                Some(match &self.editing {
                    Some(original) => {
                        let merged = new.into_tent(original.id.clone(), original.created_at);
                        MutationRequest::Update {
                            id: original.id.clone(),
                            patch: TentPatch::replace_with(&merged),
                        }
                    }
                    None => MutationRequest::Create(new),
                })
            }
            Err(errors) => {
                if let Some(first) = errors.first() {
                    self.focus = first.field;
                }
                self.errors = errors;
                None
            }
        }
    }
}

/// Capacity without a trailing `.0` for whole numbers.
pub fn format_capacity(capacity: f64) -> String {
    if capacity.fract().abs() < f64::EPSILON && capacity.abs() < 1e15 {
        format!("{capacity:.0}")
    } else {
        capacity.to_string()
    }
}
