#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Infrastructure entity types, taxonomies, and derived-field rules.
//!
//! This crate defines the canonical shapes shared by every other crate in
//! the workspace: assets, work orders, complaints, incidents, and crews,
//! plus the ward list. It also owns the pure rules that derive fields from
//! other fields (risk level from condition score, SLA deadline from
//! severity, SLA status from the deadline).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Municipal wards used as the primary geographic grouping key.
pub const WARDS: &[&str] = &[
    "Colombo 01",
    "Colombo 02",
    "Colombo 03",
    "Colombo 04",
    "Colombo 05",
    "Colombo 06",
    "Colombo 07",
    "Colombo 08",
    "Colombo 09",
    "Colombo 10",
    "Colombo 11",
    "Colombo 12",
    "Colombo 13",
    "Colombo 14",
    "Colombo 15",
    "Bambalapitiya",
    "Wellawatta",
    "Kollupitiya",
    "Cinnamon Gardens",
    "Borella",
    "Maradana",
    "Pettah",
    "Fort",
    "Slave Island",
    "Hulftsdorf",
];

/// Street names used when composing asset segments and complaint locations.
pub const STREET_NAMES: &[&str] = &[
    "Galle Road",
    "Marine Drive",
    "Duplication Road",
    "Baseline Road",
    "High Level Road",
    "Kynsey Road",
    "Ward Place",
    "Horton Place",
    "Reid Avenue",
    "Cotta Road",
    "Bauddhaloka Mawatha",
    "Dharmapala Mawatha",
    "Ananda Coomaraswamy Mawatha",
    "Sir Marcus Fernando Mawatha",
];

/// Window before an SLA deadline during which a work order counts as at risk.
pub const SLA_AT_RISK_WINDOW_HOURS: i64 = 24;

/// Formats a zero-padded sequential identifier such as `road-000042`.
#[must_use]
pub fn format_sequential_id(prefix: &str, index: usize, width: usize) -> String {
    format!("{prefix}-{index:0width$}")
}

// ── Severity / risk ──────────────────────────────────────────────────────

/// Ordinal severity shared by work orders, incidents, complaint priority,
/// and asset risk.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    /// Routine
    Low,
    /// Needs scheduling
    Medium,
    /// Needs prompt attention
    High,
    /// Needs immediate attention
    Critical,
}

/// Risk level of an asset. Same scale as [`Severity`].
pub type RiskLevel = Severity;

impl Severity {
    /// Classifies an asset condition score (0-100) into a risk level.
    ///
    /// Below 40 is critical, below 60 high, below 75 medium, otherwise low.
    #[must_use]
    pub const fn from_condition_score(score: u8) -> Self {
        if score < 40 {
            Self::Critical
        } else if score < 60 {
            Self::High
        } else if score < 75 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Hours allowed between work-order creation and its SLA deadline.
    #[must_use]
    pub const fn sla_hours(self) -> i64 {
        match self {
            Self::Critical => 24,
            Self::High => 72,
            Self::Medium => 168,
            Self::Low => 336,
        }
    }

    /// [`Self::sla_hours`] as a [`Duration`].
    #[must_use]
    pub fn sla_window(self) -> Duration {
        Duration::hours(self.sla_hours())
    }

    /// Returns all variants of this enum, lowest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High, Self::Critical]
    }
}

/// Computes the SLA deadline for a work order created at `created_at`.
#[must_use]
pub fn sla_deadline(created_at: DateTime<Utc>, severity: Severity) -> DateTime<Utc> {
    created_at + severity.sla_window()
}

/// Freshness of a work order relative to its SLA deadline.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SlaStatus {
    /// More than a day left
    OnTime,
    /// Deadline within the next day
    AtRisk,
    /// Deadline passed
    Breached,
}

impl SlaStatus {
    /// Derives the SLA status of `deadline` as observed at `now`.
    #[must_use]
    pub fn evaluate(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if now > deadline {
            Self::Breached
        } else if deadline - now < Duration::hours(SLA_AT_RISK_WINDOW_HOURS) {
            Self::AtRisk
        } else {
            Self::OnTime
        }
    }

    /// Whether the work order needs a supervisor's attention.
    #[must_use]
    pub const fn needs_attention(self) -> bool {
        matches!(self, Self::AtRisk | Self::Breached)
    }
}

// ── Status ───────────────────────────────────────────────────────────────

/// Lifecycle status shared by work orders, complaints, and incidents.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Status {
    /// Reported, not yet picked up
    Open,
    /// Being worked on
    InProgress,
    /// Work finished
    Resolved,
    /// Archived
    Closed,
}

impl Status {
    /// Open or in progress.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Open | Self::InProgress)
    }

    /// Resolved or closed.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Open, Self::InProgress, Self::Resolved, Self::Closed]
    }
}

// ── Assets ───────────────────────────────────────────────────────────────

/// Category of managed infrastructure.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AssetType {
    /// Road segment
    Road,
    /// Storm-water drain
    Drain,
    /// Street lighting pole
    Streetlight,
    /// Street tree
    Tree,
    /// Waste collection point
    Waste,
    /// Council-owned building
    Building,
}

impl AssetType {
    /// Returns all variants of this enum in generation order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Road,
            Self::Drain,
            Self::Streetlight,
            Self::Tree,
            Self::Waste,
            Self::Building,
        ]
    }

    /// Prefix used in asset identifiers.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Road => "road",
            Self::Drain => "drain",
            Self::Streetlight => "streetlight",
            Self::Tree => "tree",
            Self::Waste => "waste",
            Self::Building => "building",
        }
    }

    /// Human-readable name used when titling assets.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Road => "Road",
            Self::Drain => "Drain",
            Self::Streetlight => "Streetlight",
            Self::Tree => "Tree",
            Self::Waste => "Waste Point",
            Self::Building => "Building",
        }
    }

    /// Short label used by dashboard charts.
    #[must_use]
    pub const fn chart_label(self) -> &'static str {
        match self {
            Self::Road => "Road",
            Self::Drain => "Drain",
            Self::Streetlight => "Light",
            Self::Tree => "Tree",
            Self::Waste => "Waste",
            Self::Building => "Building",
        }
    }

    /// Title prefix for maintenance work on this kind of asset.
    #[must_use]
    pub const fn work_title(self) -> &'static str {
        match self {
            Self::Road => "Road repair",
            Self::Drain => "Drain cleaning",
            Self::Streetlight => "Light replacement",
            Self::Tree => "Tree maintenance",
            Self::Waste => "Waste collection",
            Self::Building => "Building maintenance",
        }
    }

    /// Materials typically consumed by maintenance on this kind of asset.
    #[must_use]
    pub const fn materials(self) -> &'static [&'static str] {
        match self {
            Self::Road => &["Asphalt", "Gravel", "Sealant"],
            Self::Drain => &["Concrete Pipe", "Grating"],
            Self::Streetlight => &["LED Bulb", "Wiring"],
            Self::Tree => &["Fertilizer", "Mulch"],
            Self::Waste => &["Bin Liner", "Deodorizer"],
            Self::Building => &["Paint", "Hardware"],
        }
    }
}

/// Five-level ordinal condition recorded at inspection.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConditionLevel {
    /// Like new
    Excellent,
    /// Minor wear
    Good,
    /// Serviceable
    Fair,
    /// Degraded
    Poor,
    /// Failing
    Critical,
}

impl ConditionLevel {
    /// Returns all variants of this enum, best first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Excellent,
            Self::Good,
            Self::Fair,
            Self::Poor,
            Self::Critical,
        ]
    }

    /// Inclusive range of condition scores consistent with this level.
    #[must_use]
    pub const fn score_range(self) -> (u8, u8) {
        match self {
            Self::Excellent => (85, 100),
            Self::Good => (70, 84),
            Self::Fair => (50, 69),
            Self::Poor => (30, 49),
            Self::Critical => (0, 29),
        }
    }
}

/// WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

/// Road surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SurfaceType {
    /// Asphalt
    Asphalt,
    /// Concrete
    Concrete,
    /// Gravel
    Gravel,
}

/// Drain construction material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DrainMaterial {
    /// Concrete
    Concrete,
    /// Brick
    Brick,
    /// Metal
    Metal,
}

/// Streetlight lamp technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum BulbType {
    /// Light-emitting diode
    #[serde(rename = "LED")]
    #[strum(serialize = "LED")]
    Led,
    /// Compact fluorescent
    #[serde(rename = "CFL")]
    #[strum(serialize = "CFL")]
    Cfl,
    /// Halogen
    Halogen,
}

/// Street tree species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum TreeSpecies {
    /// Coconut palm
    Coconut,
    /// Mango
    Mango,
    /// Rain tree
    #[serde(rename = "Rain Tree")]
    #[strum(serialize = "Rain Tree")]
    RainTree,
    /// Mahogany
    Mahogany,
}

/// How often a waste point is emptied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CollectionFrequency {
    /// Every day
    Daily,
    /// Twice a week
    TwiceWeekly,
    /// Once a week
    Weekly,
}

/// What a council building is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BuildingPurpose {
    /// Administrative offices
    Office,
    /// Storage
    Warehouse,
    /// Depot and workshop
    Maintenance,
    /// Public-facing facility
    Public,
}

/// Type-specific attributes of an asset.
///
/// Serialized untagged so the JSON carries only the attribute fields, as
/// a flat metadata object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetMetadata {
    /// Road segment dimensions in metres.
    #[serde(rename_all = "camelCase")]
    Road {
        /// Segment length.
        length: u32,
        /// Carriageway width.
        width: u32,
        /// Surface material.
        surface_type: SurfaceType,
    },
    /// Drain dimensions in metres.
    #[serde(rename_all = "camelCase")]
    Drain {
        /// Run length.
        length: u32,
        /// Channel depth.
        depth: u32,
        /// Construction material.
        material: DrainMaterial,
    },
    /// Streetlight fixture details.
    #[serde(rename_all = "camelCase")]
    Streetlight {
        /// Pole height in metres.
        pole_height: u32,
        /// Lamp technology.
        bulb_type: BulbType,
        /// Lamp power draw.
        wattage: u32,
    },
    /// Tree details.
    #[serde(rename_all = "camelCase")]
    Tree {
        /// Species.
        species: TreeSpecies,
        /// Age in years.
        age: u32,
        /// Height in metres.
        height: u32,
    },
    /// Waste point details.
    #[serde(rename_all = "camelCase")]
    Waste {
        /// Capacity in litres.
        capacity: u32,
        /// Collection schedule.
        collection_frequency: CollectionFrequency,
    },
    /// Building details.
    #[serde(rename_all = "camelCase")]
    Building {
        /// Gross floor area in square metres.
        floor_area: u32,
        /// Number of storeys.
        floors: u32,
        /// Use of the building.
        purpose: BuildingPurpose,
    },
}

impl AssetMetadata {
    /// The asset type these attributes belong to.
    #[must_use]
    pub const fn asset_type(&self) -> AssetType {
        match self {
            Self::Road { .. } => AssetType::Road,
            Self::Drain { .. } => AssetType::Drain,
            Self::Streetlight { .. } => AssetType::Streetlight,
            Self::Tree { .. } => AssetType::Tree,
            Self::Waste { .. } => AssetType::Waste,
            Self::Building { .. } => AssetType::Building,
        }
    }
}

/// A managed piece of infrastructure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Type-prefixed sequential ID (e.g. `road-000001`).
    pub id: String,
    /// Asset category.
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    /// Display name.
    pub name: String,
    /// Ward the asset sits in.
    pub ward: String,
    /// Street segment description.
    pub segment: String,
    /// Inspected condition.
    pub condition: ConditionLevel,
    /// Condition score, 0-100.
    pub condition_score: u8,
    /// Last inspection time.
    pub last_inspected: DateTime<Utc>,
    /// Next scheduled inspection.
    pub next_inspection: DateTime<Utc>,
    /// Risk derived from [`Self::condition_score`].
    pub risk_level: RiskLevel,
    /// Location.
    pub coordinates: Coordinates,
    /// Type-specific attributes.
    pub metadata: AssetMetadata,
}

// ── Work orders ──────────────────────────────────────────────────────────

/// A maintenance task raised against an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    /// Sequential ID (e.g. `wo-000001`).
    pub id: String,
    /// Asset the work is for.
    pub asset_id: String,
    /// Type of that asset.
    pub asset_type: AssetType,
    /// Short title.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Severity; determines the SLA window.
    pub severity: Severity,
    /// Lifecycle status.
    pub status: Status,
    /// Crew assigned, if any.
    pub assigned_crew: Option<String>,
    /// Planned completion date.
    pub due_date: DateTime<Utc>,
    /// When the order was raised.
    pub created_at: DateTime<Utc>,
    /// `created_at` plus the severity's SLA window.
    pub sla_deadline: DateTime<Utc>,
    /// SLA status as of generation time.
    pub sla_status: SlaStatus,
    /// Materials to requisition.
    pub materials: Vec<String>,
    /// Estimated cost in LKR.
    pub cost: u32,
}

impl WorkOrder {
    /// Re-derives the SLA status as observed at `now`.
    #[must_use]
    pub fn sla_status_at(&self, now: DateTime<Utc>) -> SlaStatus {
        SlaStatus::evaluate(self.sla_deadline, now)
    }

    /// Whether the SLA deadline has passed at `now`.
    #[must_use]
    pub fn is_breached_at(&self, now: DateTime<Utc>) -> bool {
        now > self.sla_deadline
    }
}

// ── Complaints ───────────────────────────────────────────────────────────

/// What a citizen complained about.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum ComplaintCategory {
    /// Potholes, cracked surfaces
    #[serde(rename = "Road Damage")]
    #[strum(serialize = "Road Damage")]
    RoadDamage,
    /// Blocked or overflowing drains
    #[serde(rename = "Drain Blockage")]
    #[strum(serialize = "Drain Blockage")]
    DrainBlockage,
    /// Lights not working
    #[serde(rename = "Streetlight Outage")]
    #[strum(serialize = "Streetlight Outage")]
    StreetlightOutage,
    /// Missed or late collection
    #[serde(rename = "Waste Collection")]
    #[strum(serialize = "Waste Collection")]
    WasteCollection,
    /// Dangerous or fallen trees
    #[serde(rename = "Tree Hazard")]
    #[strum(serialize = "Tree Hazard")]
    TreeHazard,
    /// Problems with council buildings
    #[serde(rename = "Building Issue")]
    #[strum(serialize = "Building Issue")]
    BuildingIssue,
    /// Anything else
    Other,
}

impl ComplaintCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::RoadDamage,
            Self::DrainBlockage,
            Self::StreetlightOutage,
            Self::WasteCollection,
            Self::TreeHazard,
            Self::BuildingIssue,
            Self::Other,
        ]
    }

    /// Chart bucket used by the dashboard's complaints-by-category view.
    #[must_use]
    pub const fn chart_label(self) -> &'static str {
        match self {
            Self::RoadDamage => "Road",
            Self::DrainBlockage => "Drain",
            Self::StreetlightOutage => "Light",
            Self::WasteCollection => "Waste",
            Self::TreeHazard | Self::BuildingIssue | Self::Other => "Other",
        }
    }
}

/// Tone of a complaint as classified on intake.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Sentiment {
    /// Positive
    Positive,
    /// Neutral
    Neutral,
    /// Negative
    Negative,
}

/// A citizen-reported issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    /// Sequential ID (e.g. `comp-000001`).
    pub id: String,
    /// Reporter.
    pub citizen_name: String,
    /// Reporter's phone number.
    pub contact: String,
    /// Category.
    pub category: ComplaintCategory,
    /// Free-text description.
    pub description: String,
    /// Street and ward.
    pub location: String,
    /// Ward.
    pub ward: String,
    /// Lifecycle status.
    pub status: Status,
    /// Triage priority.
    pub priority: Severity,
    /// Intake sentiment.
    pub sentiment: Sentiment,
    /// When the complaint was lodged.
    pub created_at: DateTime<Utc>,
    /// Asset the complaint is about, when known. Always in the same ward.
    pub asset_id: Option<String>,
    /// Complaint this one was merged into.
    pub merged_with: Option<String>,
}

// ── Incidents ────────────────────────────────────────────────────────────

/// Kind of field incident.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IncidentType {
    /// Surface flooding
    Flood,
    /// Drain blockage
    Blockage,
    /// Road damage
    RoadDamage,
    /// Fallen tree
    FallenTree,
    /// Several streetlights out in one area
    OutageCluster,
}

impl IncidentType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Flood,
            Self::Blockage,
            Self::RoadDamage,
            Self::FallenTree,
            Self::OutageCluster,
        ]
    }

    /// Title prefix for incidents of this kind.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Flood => "Flooding",
            Self::Blockage => "Drain Blockage",
            Self::RoadDamage => "Road Damage",
            Self::FallenTree => "Fallen Tree",
            Self::OutageCluster => "Streetlight Outage Cluster",
        }
    }
}

/// An event affecting an area of the city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Sequential ID (e.g. `inc-000001`).
    pub id: String,
    /// Kind of incident.
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Ward.
    pub ward: String,
    /// Epicentre.
    pub coordinates: Coordinates,
    /// Affected radius in metres.
    pub impact_radius: u32,
    /// Severity.
    pub severity: Severity,
    /// Lifecycle status.
    pub status: Status,
    /// When it was reported.
    pub reported_at: DateTime<Utc>,
    /// When it was resolved; set only for resolved or closed incidents.
    pub resolved_at: Option<DateTime<Utc>>,
    /// Related work orders.
    pub linked_work_orders: Vec<String>,
    /// Related complaints.
    pub linked_complaints: Vec<String>,
}

// ── Crews ────────────────────────────────────────────────────────────────

/// Whether a crew can take new work.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Availability {
    /// Free for dispatch
    Available,
    /// Out on a job
    OnDuty,
    /// Not working
    OffDuty,
}

/// Working shift.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Shift {
    /// Morning
    Morning,
    /// Afternoon
    Afternoon,
    /// Night
    Night,
}

/// A field team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crew {
    /// Sequential ID (e.g. `crew-001`).
    pub id: String,
    /// Team name.
    pub name: String,
    /// Team lead.
    pub team_lead: String,
    /// Members.
    pub members: Vec<String>,
    /// Equipment carried.
    pub equipment: Vec<String>,
    /// Dispatch availability.
    pub availability: Availability,
    /// Ward the crew is working in; set only while on duty.
    pub current_location: Option<String>,
    /// Shift.
    pub shift: Shift,
}

// ── Dataset ──────────────────────────────────────────────────────────────

/// The complete generated dataset. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockDataset {
    /// All assets, grouped by type in generation order.
    pub assets: Vec<Asset>,
    /// Work orders.
    pub work_orders: Vec<WorkOrder>,
    /// Complaints.
    pub complaints: Vec<Complaint>,
    /// Incidents.
    pub incidents: Vec<Incident>,
    /// Crews.
    pub crews: Vec<Crew>,
    /// Ward names.
    pub wards: Vec<String>,
}

impl MockDataset {
    /// Looks up an asset by ID.
    #[must_use]
    pub fn asset(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Looks up a work order by ID.
    #[must_use]
    pub fn work_order(&self, id: &str) -> Option<&WorkOrder> {
        self.work_orders.iter().find(|w| w.id == id)
    }

    /// Looks up an incident by ID.
    #[must_use]
    pub fn incident(&self, id: &str) -> Option<&Incident> {
        self.incidents.iter().find(|i| i.id == id)
    }

    /// Looks up a crew by ID.
    #[must_use]
    pub fn crew(&self, id: &str) -> Option<&Crew> {
        self.crews.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn risk_level_thresholds() {
        assert_eq!(Severity::from_condition_score(0), Severity::Critical);
        assert_eq!(Severity::from_condition_score(39), Severity::Critical);
        assert_eq!(Severity::from_condition_score(40), Severity::High);
        assert_eq!(Severity::from_condition_score(59), Severity::High);
        assert_eq!(Severity::from_condition_score(60), Severity::Medium);
        assert_eq!(Severity::from_condition_score(74), Severity::Medium);
        assert_eq!(Severity::from_condition_score(75), Severity::Low);
        assert_eq!(Severity::from_condition_score(100), Severity::Low);
    }

    #[test]
    fn sla_deadline_offsets_by_severity() {
        let created = at(0);
        for (severity, hours) in [
            (Severity::Critical, 24),
            (Severity::High, 72),
            (Severity::Medium, 168),
            (Severity::Low, 336),
        ] {
            assert_eq!(
                sla_deadline(created, severity),
                created + Duration::hours(hours),
                "{severity:?}"
            );
        }
    }

    #[test]
    fn sla_status_boundaries() {
        let deadline = at(12);
        assert_eq!(
            SlaStatus::evaluate(deadline, deadline + Duration::seconds(1)),
            SlaStatus::Breached
        );
        assert_eq!(SlaStatus::evaluate(deadline, deadline), SlaStatus::AtRisk);
        assert_eq!(
            SlaStatus::evaluate(deadline, deadline - Duration::hours(23)),
            SlaStatus::AtRisk
        );
        assert_eq!(
            SlaStatus::evaluate(deadline, deadline - Duration::hours(24)),
            SlaStatus::OnTime
        );
        assert_eq!(
            SlaStatus::evaluate(deadline, deadline - Duration::days(10)),
            SlaStatus::OnTime
        );
    }

    #[test]
    fn condition_ranges_agree_with_risk_bands() {
        for level in ConditionLevel::all() {
            let (lo, hi) = level.score_range();
            assert!(lo <= hi && hi <= 100, "{level:?}");
        }
        let (lo, _) = ConditionLevel::Excellent.score_range();
        assert_eq!(Severity::from_condition_score(lo), Severity::Low);
        let (_, hi) = ConditionLevel::Critical.score_range();
        assert_eq!(Severity::from_condition_score(hi), Severity::Critical);
    }

    #[test]
    fn sequential_ids_are_zero_padded() {
        assert_eq!(format_sequential_id("road", 1, 6), "road-000001");
        assert_eq!(format_sequential_id("crew", 42, 3), "crew-042");
        assert_eq!(format_sequential_id("wo", 1_234_567, 6), "wo-1234567");
    }

    #[test]
    fn enums_use_snake_case_wire_names() {
        assert_eq!(SlaStatus::AtRisk.to_string(), "at_risk");
        assert_eq!("in_progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!(
            serde_json::to_string(&Availability::OnDuty).unwrap(),
            "\"on_duty\""
        );
        assert_eq!(
            "Streetlight Outage".parse::<ComplaintCategory>().unwrap(),
            ComplaintCategory::StreetlightOutage
        );
    }

    #[test]
    fn metadata_serializes_flat_and_round_trips_by_shape() {
        let drain = AssetMetadata::Drain {
            length: 40,
            depth: 2,
            material: DrainMaterial::Brick,
        };
        let json = serde_json::to_value(&drain).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"length": 40, "depth": 2, "material": "brick"})
        );
        let back: AssetMetadata = serde_json::from_value(json).unwrap();
        assert_eq!(back.asset_type(), AssetType::Drain);

        let light = AssetMetadata::Streetlight {
            pole_height: 8,
            bulb_type: BulbType::Led,
            wattage: 120,
        };
        let json = serde_json::to_value(&light).unwrap();
        assert_eq!(json["bulbType"], "LED");
        assert_eq!(json["poleHeight"], 8);
    }

    #[test]
    fn status_buckets() {
        assert!(Status::Open.is_active());
        assert!(Status::InProgress.is_active());
        assert!(Status::Resolved.is_done());
        assert!(Status::Closed.is_done());
        assert!(!Status::Open.is_done());
    }
}
