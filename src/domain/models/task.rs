//! Task domain model.
//!
//! A task is a piece of personal work that moves between four status lanes.
//! Tasks with a parent are subtasks: checklist items that never get scored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::errors::ValidationErrors;

/// Lane a task currently sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not all ratings present yet
    Unrated,
    /// Fully rated and scored
    Rated,
    /// Set aside for later
    Parked,
    /// Done
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Unrated
    }
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [Self::Unrated, Self::Rated, Self::Parked, Self::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unrated => "unrated",
            Self::Rated => "rated",
            Self::Parked => "parked",
            Self::Completed => "completed",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "unrated" => Some(Self::Unrated),
            "rated" => Some(Self::Rated),
            "parked" => Some(Self::Parked),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Parked and completed tasks are held out of the scoring lanes.
    pub fn is_shelved(&self) -> bool {
        matches!(self, Self::Parked | Self::Completed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the three user ratings that feed the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingField {
    Energy,
    Simplicity,
    Impact,
}

impl RatingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::Simplicity => "simplicity",
            Self::Impact => "impact",
        }
    }
}

/// The energy/simplicity/impact triple, each 0..=10 when present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratings {
    pub energy: Option<i32>,
    pub simplicity: Option<i32>,
    pub impact: Option<i32>,
}

impl Ratings {
    pub fn new(energy: i32, simplicity: i32, impact: i32) -> Self {
        Self {
            energy: Some(energy),
            simplicity: Some(simplicity),
            impact: Some(impact),
        }
    }

    /// All three values, if every one is present.
    pub fn complete(&self) -> Option<(i32, i32, i32)> {
        Some((self.energy?, self.simplicity?, self.impact?))
    }

    pub fn is_complete(&self) -> bool {
        self.complete().is_some()
    }

    pub fn missing(&self) -> Vec<RatingField> {
        let mut missing = Vec::new();
        if self.energy.is_none() {
            missing.push(RatingField::Energy);
        }
        if self.simplicity.is_none() {
            missing.push(RatingField::Simplicity);
        }
        if self.impact.is_none() {
            missing.push(RatingField::Impact);
        }
        missing
    }
}

/// A task or subtask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    /// Parent task; set only on subtasks
    pub parent_task_id: Option<Uuid>,
    /// Order among siblings (subtasks only)
    pub position: i32,
    pub title: String,
    pub status: TaskStatus,
    pub energy: Option<i32>,
    pub simplicity: Option<i32>,
    pub impact: Option<i32>,
    /// Derived; never set directly
    pub score: Option<f64>,
    pub cognitive_density: i32,
    pub estimated_hours: f64,
    pub notes: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub is_focus_task: bool,
    pub actual_energy: Option<i32>,
    pub actual_simplicity: Option<i32>,
    pub actual_impact: Option<i32>,
    pub time_spent: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// A fresh unrated task with zero density and zero hours.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            parent_task_id: None,
            position: 0,
            title: title.into(),
            status: TaskStatus::Unrated,
            energy: None,
            simplicity: None,
            impact: None,
            score: None,
            cognitive_density: 0,
            estimated_hours: 0.0,
            notes: None,
            due_date: None,
            is_focus_task: false,
            actual_energy: None,
            actual_simplicity: None,
            actual_impact: None,
            time_spent: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_ratings(mut self, energy: i32, simplicity: i32, impact: i32) -> Self {
        self.energy = Some(energy);
        self.simplicity = Some(simplicity);
        self.impact = Some(impact);
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_parent(mut self, parent_id: Uuid) -> Self {
        self.parent_task_id = Some(parent_id);
        self
    }

    pub fn with_effort(mut self, cognitive_density: i32, estimated_hours: f64) -> Self {
        self.cognitive_density = cognitive_density;
        self.estimated_hours = estimated_hours;
        self
    }

    pub fn is_subtask(&self) -> bool {
        self.parent_task_id.is_some()
    }

    pub fn ratings(&self) -> Ratings {
        Ratings {
            energy: self.energy,
            simplicity: self.simplicity,
            impact: self.impact,
        }
    }

    pub fn has_all_ratings(&self) -> bool {
        self.ratings().is_complete()
    }

    /// Check field-level rules. Returns every violation, not just the first.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if self.title.trim().is_empty() {
            errors.add("title", "can't be blank");
        }

        check_range(&mut errors, "cognitive_density", Some(f64::from(self.cognitive_density)), 0.0, 3.0);
        check_range(&mut errors, "estimated_hours", Some(self.estimated_hours), 0.0, 8.0);

        for (field, value) in [
            ("energy", self.energy),
            ("simplicity", self.simplicity),
            ("impact", self.impact),
            ("actual_energy", self.actual_energy),
            ("actual_simplicity", self.actual_simplicity),
            ("actual_impact", self.actual_impact),
        ] {
            check_range(&mut errors, field, value.map(f64::from), 0.0, 10.0);
        }

        if let Some(spent) = self.time_spent {
            if spent.is_nan() || spent < 0.0 {
                errors.add("time_spent", "must be greater than or equal to 0");
            }
        }

        if self.is_subtask() && !matches!(self.status, TaskStatus::Unrated | TaskStatus::Completed) {
            errors.add("status", "must be unrated or completed for a subtask");
        }

        errors
    }
}

fn check_range(errors: &mut ValidationErrors, field: &str, value: Option<f64>, min: f64, max: f64) {
    let Some(value) = value else { return };
    if value.is_nan() || value < min {
        errors.add(field, format!("must be greater than or equal to {min}"));
    } else if value > max {
        errors.add(field, format!("must be less than or equal to {max}"));
    }
}

/// Per-lane totals over main tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub unrated_count: u64,
    pub rated_count: u64,
    pub parked_count: u64,
    pub completed_count: u64,
}

impl StatusCounts {
    pub fn get(&self, status: TaskStatus) -> u64 {
        match status {
            TaskStatus::Unrated => self.unrated_count,
            TaskStatus::Rated => self.rated_count,
            TaskStatus::Parked => self.parked_count,
            TaskStatus::Completed => self.completed_count,
        }
    }

    pub fn set(&mut self, status: TaskStatus, count: u64) {
        match status {
            TaskStatus::Unrated => self.unrated_count = count,
            TaskStatus::Rated => self.rated_count = count,
            TaskStatus::Parked => self.parked_count = count,
            TaskStatus::Completed => self.completed_count = count,
        }
    }

    pub fn total(&self) -> u64 {
        self.unrated_count + self.rated_count + self.parked_count + self.completed_count
    }
}

/// Accept an explicit `null` as `Some(None)` so a patch can clear a field.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial attributes for create and update.
///
/// Outer `None` leaves a field alone. For clearable fields `Some(None)` clears it.
/// `status` stays a raw string so an unknown value surfaces as a field error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub energy: Option<Option<i32>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub simplicity: Option<Option<i32>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub impact: Option<Option<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cognitive_density: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_focus_task: Option<bool>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub actual_energy: Option<Option<i32>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub actual_simplicity: Option<Option<i32>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub actual_impact: Option<Option<i32>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<Option<f64>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<Option<Uuid>>,
}

impl TaskPatch {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status.as_str().to_string()),
            ..Default::default()
        }
    }

    pub fn ratings(energy: Option<i32>, simplicity: Option<i32>, impact: Option<i32>) -> Self {
        Self {
            energy: Some(energy),
            simplicity: Some(simplicity),
            impact: Some(impact),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Copy every present field onto `task`. Status is handled by the caller.
    pub fn apply_fields(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title.clone_from(title);
        }
        if let Some(v) = self.energy {
            task.energy = v;
        }
        if let Some(v) = self.simplicity {
            task.simplicity = v;
        }
        if let Some(v) = self.impact {
            task.impact = v;
        }
        if let Some(v) = self.cognitive_density {
            task.cognitive_density = v;
        }
        if let Some(v) = self.estimated_hours {
            task.estimated_hours = v;
        }
        if let Some(v) = &self.notes {
            task.notes.clone_from(v);
        }
        if let Some(v) = self.due_date {
            task.due_date = v;
        }
        if let Some(v) = self.is_focus_task {
            task.is_focus_task = v;
        }
        if let Some(v) = self.actual_energy {
            task.actual_energy = v;
        }
        if let Some(v) = self.actual_simplicity {
            task.actual_simplicity = v;
        }
        if let Some(v) = self.actual_impact {
            task.actual_impact = v;
        }
        if let Some(v) = self.time_spent {
            task.time_spent = v;
        }
        if let Some(v) = self.parent_task_id {
            task.parent_task_id = v;
        }
    }

    /// The patch that puts back what this patch is about to overwrite on `current`.
    ///
    /// A move from unrated into rated is undone by restoring the ratings
    /// alone: the engine demotes the task, while an explicit rated -> unrated
    /// move is refused by the lane table.
    pub fn inverse_for(&self, current: &Task) -> TaskPatch {
        let promoted = current.status == TaskStatus::Unrated
            && self.status.as_deref() == Some(TaskStatus::Rated.as_str());

        TaskPatch {
            title: self.title.as_ref().map(|_| current.title.clone()),
            status: self
                .status
                .as_ref()
                .filter(|_| !promoted)
                .map(|_| current.status.as_str().to_string()),
            energy: self.energy.map(|_| current.energy),
            simplicity: self.simplicity.map(|_| current.simplicity),
            impact: self.impact.map(|_| current.impact),
            cognitive_density: self.cognitive_density.map(|_| current.cognitive_density),
            estimated_hours: self.estimated_hours.map(|_| current.estimated_hours),
            notes: self.notes.as_ref().map(|_| current.notes.clone()),
            due_date: self.due_date.map(|_| current.due_date),
            is_focus_task: self.is_focus_task.map(|_| current.is_focus_task),
            actual_energy: self.actual_energy.map(|_| current.actual_energy),
            actual_simplicity: self.actual_simplicity.map(|_| current.actual_simplicity),
            actual_impact: self.actual_impact.map(|_| current.actual_impact),
            time_spent: self.time_spent.map(|_| current.time_spent),
            parent_task_id: self.parent_task_id.map(|_| current.parent_task_id),
        }
    }
}
