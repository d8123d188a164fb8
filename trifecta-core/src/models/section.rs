use serde::{Deserialize, Serialize};

/// Which corner of the Trifecta triangle a section occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionPosition {
    Foundation,
    Operations,
    Holdings,
}

impl SectionPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Foundation => "foundation",
            Self::Operations => "operations",
            Self::Holdings => "holdings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    Completed,
    #[default]
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMetric {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubComponent {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrifectaSection {
    #[serde(rename = "Id")]
    pub id: i64,
    pub name: String,
    pub position: SectionPosition,
    #[serde(default)]
    pub status: SectionStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub metrics: Vec<SectionMetric>,
    #[serde(default)]
    pub sub_components: Vec<SubComponent>,
}

impl TrifectaSection {
    pub fn from_new(
        id: i64,
        new: NewTrifectaSection,
    ) -> Self {
        Self {
            id,
            name: new.name,
            position: new.position,
            status: new.status,
            description: new.description,
            metrics: new.metrics,
            sub_components: new.sub_components,
        }
    }

    /// Overwrites every field that `update` carries; `id` never changes.
    pub fn apply(
        &mut self,
        update: SectionUpdate,
    ) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(position) = update.position {
            self.position = position;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(metrics) = update.metrics {
            self.metrics = metrics;
        }
        if let Some(sub_components) = update.sub_components {
            self.sub_components = sub_components;
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == SectionStatus::Completed
    }
}

/// For creating new sections (no id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrifectaSection {
    pub name: String,
    pub position: SectionPosition,
    #[serde(default)]
    pub status: SectionStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub metrics: Vec<SectionMetric>,
    #[serde(default)]
    pub sub_components: Vec<SubComponent>,
}

impl From<TrifectaSection> for NewTrifectaSection {
    fn from(section: TrifectaSection) -> Self {
        Self {
            name: section.name,
            position: section.position,
            status: section.status,
            description: section.description,
            metrics: section.metrics,
            sub_components: section.sub_components,
        }
    }
}

/// Partial update; `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionUpdate {
    pub name: Option<String>,
    pub position: Option<SectionPosition>,
    pub status: Option<SectionStatus>,
    pub description: Option<String>,
    pub metrics: Option<Vec<SectionMetric>>,
    pub sub_components: Option<Vec<SubComponent>>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> TrifectaSection {
        TrifectaSection {
            id: 7,
            name: "Foundation".to_string(),
            position: SectionPosition::Foundation,
            status: SectionStatus::Pending,
            description: "Trusts and asset protection".to_string(),
            metrics: vec![],
            sub_components: vec![],
        }
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut section = sample();

        section.apply(SectionUpdate {
            status: Some(SectionStatus::Completed),
            ..Default::default()
        });

        assert_eq!(section.status, SectionStatus::Completed);
        assert_eq!(section.name, "Foundation");
        assert_eq!(section.id, 7);
    }

    #[test]
    fn empty_update_is_a_no_op() {
        let mut section = sample();

        section.apply(SectionUpdate::default());

        assert_eq!(section, sample());
    }

    #[test]
    fn from_new_assigns_id() {
        let new = NewTrifectaSection::from(sample());

        let section = TrifectaSection::from_new(42, new);

        assert_eq!(section.id, 42);
        assert_eq!(section.description, "Trusts and asset protection");
    }

    #[test]
    fn is_completed_reflects_status() {
        let mut section = sample();
        assert!(!section.is_completed());

        section.status = SectionStatus::Completed;
        assert!(section.is_completed());
    }
}
