#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Seeded generator for the infrastructure mock dataset.
//!
//! Produces assets, work orders, complaints, incidents, and crews in one
//! pass. Every derived field (risk level, SLA deadline, SLA status) is
//! computed with the rules in [`cmc_infra_models`], and every generated
//! reference (a work order's asset, a complaint's asset) points at an
//! entity that exists in the same dataset.
//!
//! All functions take the RNG and the reference instant `now` explicitly,
//! so a fixed seed and a fixed `now` always yield the same dataset.

pub mod config;
pub mod interactive;
pub mod progress;

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use cmc_infra_models::{
    Asset, AssetMetadata, AssetType, Availability, BuildingPurpose, BulbType, CollectionFrequency,
    Complaint, ComplaintCategory, ConditionLevel, Coordinates, Crew, DrainMaterial, Incident,
    IncidentType, MockDataset, STREET_NAMES, Sentiment, Severity, Shift, SlaStatus, Status,
    SurfaceType, TreeSpecies, WARDS, WorkOrder, format_sequential_id, sla_deadline,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use config::GeneratorConfig;
use config::Origin;
use progress::ProgressCallback;

/// Errors that can occur while generating or writing a dataset.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Generator config could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Generator config parsed but is unusable.
    #[error("Invalid config: {message}")]
    InvalidConfig {
        /// Description of what went wrong.
        message: String,
    },

    /// Serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Interactive prompt failed.
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// A work order was requested with no assets to attach it to.
    #[error("Cannot generate work orders without assets")]
    NoAssets,
}

/// Width of the zero-padded index in asset, work-order, complaint, and
/// incident IDs.
const ENTITY_ID_WIDTH: usize = 6;

/// Width of the zero-padded index in crew IDs.
const CREW_ID_WIDTH: usize = 3;

const CITIZEN_NAMES: &[&str] = &[
    "Kamal Perera",
    "Nimal Silva",
    "Priya Fernando",
    "Rohan Jayasuriya",
    "Anjali Wickramasinghe",
    "Suresh Mendis",
    "Lakshmi De Silva",
    "Dilshan Karunaratne",
];

const CREW_NAMES: &[&str] = &[
    "Team Alpha",
    "Team Beta",
    "Team Gamma",
    "Team Delta",
    "Maintenance Unit 1",
    "Maintenance Unit 2",
    "Emergency Response",
    "Night Shift Team",
];

const TEAM_LEADS: &[&str] = &[
    "Nimal Perera",
    "Kamal Silva",
    "Priya Fernando",
    "Rohan Jayasuriya",
    "Anjali Wickramasinghe",
    "Suresh Mendis",
];

const CREW_MEMBERS: &[&str] = &["Member 1", "Member 2", "Member 3", "Member 4"];

const CREW_EQUIPMENT: &[&str] = &["Truck", "Tools", "Safety Gear", "Communication"];

/// Returns a uniformly chosen element of a non-empty slice.
fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Returns a uniformly distributed instant in `[start, end]`.
fn random_between<R: Rng + ?Sized>(
    rng: &mut R,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DateTime<Utc> {
    let span = (end - start).num_milliseconds().max(0);
    start + Duration::milliseconds(rng.gen_range(0..=span))
}

/// Returns a point scattered uniformly in the square around `origin`.
fn scatter<R: Rng + ?Sized>(rng: &mut R, origin: &Origin) -> Coordinates {
    Coordinates {
        lat: origin.lat + (rng.r#gen::<f64>() - 0.5) * origin.spread_degrees,
        lon: origin.lon + (rng.r#gen::<f64>() - 0.5) * origin.spread_degrees,
    }
}

/// Builds an RNG from the config's seed, or from OS entropy when unset.
#[must_use]
pub fn rng_for(config: &GeneratorConfig) -> StdRng {
    config
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

fn generate_metadata<R: Rng + ?Sized>(rng: &mut R, asset_type: AssetType) -> AssetMetadata {
    match asset_type {
        AssetType::Road => AssetMetadata::Road {
            length: rng.gen_range(50..=500),
            width: rng.gen_range(3..=12),
            surface_type: *pick(
                rng,
                &[SurfaceType::Asphalt, SurfaceType::Concrete, SurfaceType::Gravel],
            ),
        },
        AssetType::Drain => AssetMetadata::Drain {
            length: rng.gen_range(10..=200),
            depth: rng.gen_range(1..=3),
            material: *pick(
                rng,
                &[
                    DrainMaterial::Concrete,
                    DrainMaterial::Brick,
                    DrainMaterial::Metal,
                ],
            ),
        },
        AssetType::Streetlight => AssetMetadata::Streetlight {
            pole_height: rng.gen_range(5..=12),
            bulb_type: *pick(rng, &[BulbType::Led, BulbType::Cfl, BulbType::Halogen]),
            wattage: rng.gen_range(50..=200),
        },
        AssetType::Tree => AssetMetadata::Tree {
            species: *pick(
                rng,
                &[
                    TreeSpecies::Coconut,
                    TreeSpecies::Mango,
                    TreeSpecies::RainTree,
                    TreeSpecies::Mahogany,
                ],
            ),
            age: rng.gen_range(5..=50),
            height: rng.gen_range(3..=15),
        },
        AssetType::Waste => AssetMetadata::Waste {
            capacity: rng.gen_range(100..=1000),
            collection_frequency: *pick(
                rng,
                &[
                    CollectionFrequency::Daily,
                    CollectionFrequency::TwiceWeekly,
                    CollectionFrequency::Weekly,
                ],
            ),
        },
        AssetType::Building => AssetMetadata::Building {
            floor_area: rng.gen_range(100..=5000),
            floors: rng.gen_range(1..=5),
            purpose: *pick(
                rng,
                &[
                    BuildingPurpose::Office,
                    BuildingPurpose::Warehouse,
                    BuildingPurpose::Maintenance,
                    BuildingPurpose::Public,
                ],
            ),
        },
    }
}

/// Generates one asset with sequential ID `index`.
pub fn generate_asset<R: Rng + ?Sized>(
    rng: &mut R,
    asset_type: AssetType,
    index: usize,
    origin: &Origin,
    now: DateTime<Utc>,
) -> Asset {
    let ward = *pick(rng, WARDS);
    let segment = format!(
        "{} - Segment {}",
        pick(rng, STREET_NAMES),
        rng.gen_range(1..=50)
    );
    let condition = *pick(rng, ConditionLevel::all());
    let (lo, hi) = condition.score_range();
    let condition_score = rng.gen_range(lo..=hi);

    let last_inspected = random_between(rng, now - Duration::days(180), now);
    let next_inspection = random_between(rng, now, now + Duration::days(90));
    let coordinates = scatter(rng, origin);
    let metadata = generate_metadata(rng, asset_type);

    Asset {
        id: format_sequential_id(asset_type.id_prefix(), index, ENTITY_ID_WIDTH),
        asset_type,
        name: format!("{} {segment}", asset_type.display_name()),
        ward: ward.to_string(),
        segment,
        condition,
        condition_score,
        last_inspected,
        next_inspection,
        risk_level: Severity::from_condition_score(condition_score),
        coordinates,
        metadata,
    }
}

/// Generates `count` assets of one type with IDs `start_index..start_index + count`.
pub fn generate_assets<R: Rng + ?Sized>(
    rng: &mut R,
    asset_type: AssetType,
    count: usize,
    start_index: usize,
    origin: &Origin,
    now: DateTime<Utc>,
) -> Vec<Asset> {
    (start_index..start_index + count)
        .map(|index| generate_asset(rng, asset_type, index, origin, now))
        .collect()
}

/// Generates one work order against a random asset from `assets`.
///
/// Non-open orders are assigned to one of the `crew_count` crews.
///
/// # Errors
///
/// Returns [`GenerateError::NoAssets`] if `assets` is empty.
pub fn generate_work_order<R: Rng + ?Sized>(
    rng: &mut R,
    index: usize,
    assets: &[Asset],
    crew_count: usize,
    now: DateTime<Utc>,
) -> Result<WorkOrder, GenerateError> {
    if assets.is_empty() {
        return Err(GenerateError::NoAssets);
    }
    let asset = pick(rng, assets);
    let severity = *pick(rng, Severity::all());
    let status = *pick(rng, Status::all());

    let created_at = random_between(rng, now - Duration::days(30), now);
    let due_date = random_between(rng, now, now + Duration::days(30));
    let deadline = sla_deadline(created_at, severity);

    let assigned_crew = (status != Status::Open && crew_count > 0).then(|| {
        format_sequential_id("crew", rng.gen_range(1..=crew_count), CREW_ID_WIDTH)
    });

    let all_materials = asset.asset_type.materials();
    let material_count = rng.gen_range(1..=3).min(all_materials.len());
    let materials = all_materials[..material_count]
        .iter()
        .map(ToString::to_string)
        .collect();

    Ok(WorkOrder {
        id: format_sequential_id("wo", index, ENTITY_ID_WIDTH),
        asset_id: asset.id.clone(),
        asset_type: asset.asset_type,
        title: format!("{} - {}", asset.asset_type.work_title(), asset.segment),
        description: format!(
            "Maintenance work required for {} in {}. Condition: {}.",
            asset.name, asset.ward, asset.condition
        ),
        severity,
        status,
        assigned_crew,
        due_date,
        created_at,
        sla_deadline: deadline,
        sla_status: SlaStatus::evaluate(deadline, now),
        materials,
        cost: rng.gen_range(5_000..=500_000),
    })
}

/// Generates one complaint. Seven in ten complaints are linked to an asset
/// in the complaint's ward when that ward has any.
pub fn generate_complaint<R: Rng + ?Sized>(
    rng: &mut R,
    index: usize,
    assets: &[Asset],
    now: DateTime<Utc>,
) -> Complaint {
    let ward = *pick(rng, WARDS);
    let linked = rng.gen_bool(0.7);
    let asset_id = if linked {
        let in_ward: Vec<&Asset> = assets.iter().filter(|a| a.ward == ward).collect();
        (!in_ward.is_empty()).then(|| pick(rng, &in_ward).id.clone())
    } else {
        None
    };

    let sentiment = *pick(
        rng,
        &[Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative],
    );
    let priority = if sentiment == Sentiment::Negative && rng.gen_bool(0.5) {
        Severity::High
    } else {
        *pick(rng, &[Severity::Low, Severity::Medium, Severity::High])
    };
    let status = *pick(rng, Status::all());
    let created_at = random_between(rng, now - Duration::days(60), now);
    let category = *pick(rng, ComplaintCategory::all());
    let mentioned = *pick(rng, ComplaintCategory::all());

    Complaint {
        id: format_sequential_id("comp", index, ENTITY_ID_WIDTH),
        citizen_name: pick(rng, CITIZEN_NAMES).to_string(),
        contact: format!(
            "0{}{}",
            rng.gen_range(70..=77),
            rng.gen_range(1_000_000..=9_999_999)
        ),
        category,
        description: format!(
            "Complaint regarding {} in {ward}.",
            mentioned.as_ref().to_lowercase()
        ),
        location: format!("{}, {ward}", pick(rng, STREET_NAMES)),
        ward: ward.to_string(),
        status,
        priority,
        sentiment,
        created_at,
        asset_id,
        merged_with: None,
    }
}

/// Generates one incident located at a random asset in its ward, or at a
/// scattered point when the ward has no assets.
pub fn generate_incident<R: Rng + ?Sized>(
    rng: &mut R,
    index: usize,
    assets: &[Asset],
    origin: &Origin,
    now: DateTime<Utc>,
) -> Incident {
    let incident_type = *pick(rng, IncidentType::all());
    let ward = *pick(rng, WARDS);
    let in_ward: Vec<&Asset> = assets.iter().filter(|a| a.ward == ward).collect();
    let coordinates = if in_ward.is_empty() {
        scatter(rng, origin)
    } else {
        pick(rng, &in_ward).coordinates
    };
    let severity = *pick(rng, Severity::all());
    let status = *pick(rng, Status::all());
    let reported_at = random_between(rng, now - Duration::days(7), now);
    let resolved_at = status
        .is_done()
        .then(|| random_between(rng, reported_at, now));

    Incident {
        id: format_sequential_id("inc", index, ENTITY_ID_WIDTH),
        incident_type,
        title: format!("{} - {ward}", incident_type.title()),
        description: format!("Incident reported in {ward} affecting multiple assets."),
        ward: ward.to_string(),
        coordinates,
        impact_radius: rng.gen_range(50..=500),
        severity,
        status,
        reported_at,
        resolved_at,
        linked_work_orders: Vec::new(),
        linked_complaints: Vec::new(),
    }
}

/// Generates one crew.
pub fn generate_crew<R: Rng + ?Sized>(rng: &mut R, index: usize) -> Crew {
    let availability = *pick(
        rng,
        &[
            Availability::Available,
            Availability::OnDuty,
            Availability::OffDuty,
        ],
    );
    let shift = *pick(rng, &[Shift::Morning, Shift::Afternoon, Shift::Night]);

    let name = pick(rng, CREW_NAMES).to_string();
    let team_lead = pick(rng, TEAM_LEADS).to_string();
    let members = CREW_MEMBERS[..rng.gen_range(2..=4)]
        .iter()
        .map(ToString::to_string)
        .collect();
    let equipment = CREW_EQUIPMENT[..rng.gen_range(2..=4)]
        .iter()
        .map(ToString::to_string)
        .collect();
    let current_location =
        (availability == Availability::OnDuty).then(|| pick(rng, WARDS).to_string());

    Crew {
        id: format_sequential_id("crew", index, CREW_ID_WIDTH),
        name,
        team_lead,
        members,
        equipment,
        availability,
        current_location,
        shift,
    }
}

/// Generates a complete dataset.
///
/// Asset IDs run sequentially across types in [`AssetType::all`] order, so
/// the first drain follows the last road.
///
/// # Errors
///
/// Returns [`GenerateError::NoAssets`] if work orders are requested but no
/// assets are configured.
pub fn generate_mock_data<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
    now: DateTime<Utc>,
    progress: &dyn ProgressCallback,
) -> Result<MockDataset, GenerateError> {
    progress.set_total(config.total_entities() as u64);

    let mut assets = Vec::with_capacity(config.assets.total());
    for asset_type in AssetType::all() {
        let count = config.assets.count_for(*asset_type);
        progress.set_message(format!("Generating {count} {asset_type} assets"));
        let batch = generate_assets(
            rng,
            *asset_type,
            count,
            assets.len() + 1,
            &config.origin,
            now,
        );
        assets.extend(batch);
        progress.inc(count as u64);
    }
    log::debug!("Generated {} assets", assets.len());

    progress.set_message(format!("Generating {} work orders", config.work_orders));
    let work_orders = (1..=config.work_orders)
        .map(|i| generate_work_order(rng, i, &assets, config.crews, now))
        .collect::<Result<Vec<_>, _>>()?;
    progress.inc(config.work_orders as u64);

    progress.set_message(format!("Generating {} complaints", config.complaints));
    let complaints: Vec<Complaint> = (1..=config.complaints)
        .map(|i| generate_complaint(rng, i, &assets, now))
        .collect();
    progress.inc(config.complaints as u64);

    progress.set_message(format!("Generating {} incidents", config.incidents));
    let incidents: Vec<Incident> = (1..=config.incidents)
        .map(|i| generate_incident(rng, i, &assets, &config.origin, now))
        .collect();
    progress.inc(config.incidents as u64);

    progress.set_message(format!("Generating {} crews", config.crews));
    let crews: Vec<Crew> = (1..=config.crews).map(|i| generate_crew(rng, i)).collect();
    progress.inc(config.crews as u64);

    progress.finish(format!(
        "Generated {} assets, {} work orders, {} complaints, {} incidents, {} crews",
        assets.len(),
        work_orders.len(),
        complaints.len(),
        incidents.len(),
        crews.len()
    ));

    Ok(MockDataset {
        assets,
        work_orders,
        complaints,
        incidents,
        crews,
        wards: WARDS.iter().map(ToString::to_string).collect(),
    })
}

/// Generates a dataset from `config`, seeding the RNG from its `seed`.
///
/// # Errors
///
/// See [`generate_mock_data`].
pub fn generate_from_config(
    config: &GeneratorConfig,
    now: DateTime<Utc>,
    progress: &dyn ProgressCallback,
) -> Result<MockDataset, GenerateError> {
    let mut rng = rng_for(config);
    generate_mock_data(config, &mut rng, now, progress)
}

/// Writes `dataset` as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns [`GenerateError`] on I/O or serialization failure.
pub fn write_dataset(dataset: &MockDataset, path: &Path) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(dataset)?;
    std::fs::write(path, json)?;
    log::info!("Wrote dataset to {}", path.display());
    Ok(())
}

/// Reads a dataset previously written by [`write_dataset`].
///
/// # Errors
///
/// Returns [`GenerateError`] on I/O or deserialization failure.
pub fn read_dataset(path: &Path) -> Result<MockDataset, GenerateError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::TimeZone as _;

    use super::*;
    use crate::progress::NullProgress;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 9, 30, 0).unwrap()
    }

    fn small_config(seed: u64) -> GeneratorConfig {
        GeneratorConfig::from_toml_str(&format!(
            "seed = {seed}\nwork_orders = 120\ncomplaints = 200\nincidents = 40\ncrews = 12\n\
             [assets]\nroad = 30\ndrain = 25\nstreetlight = 20\ntree = 15\nwaste = 10\nbuilding = 5\n"
        ))
        .unwrap()
    }

    fn dataset(seed: u64) -> MockDataset {
        generate_from_config(&small_config(seed), now(), &NullProgress).unwrap()
    }

    #[test]
    fn asset_batch_has_exact_count_and_sequential_ids() {
        let mut rng = StdRng::seed_from_u64(1);
        let assets = generate_assets(
            &mut rng,
            AssetType::Streetlight,
            25,
            1,
            &Origin::default(),
            now(),
        );
        assert_eq!(assets.len(), 25);
        for (i, asset) in assets.iter().enumerate() {
            assert_eq!(asset.id, format!("streetlight-{:06}", i + 1));
            assert_eq!(asset.asset_type, AssetType::Streetlight);
            assert_eq!(asset.metadata.asset_type(), AssetType::Streetlight);
        }
        let unique: HashSet<&str> = assets.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(unique.len(), 25);
    }

    #[test]
    fn asset_fields_respect_derivation_rules() {
        let origin = Origin::default();
        for asset in dataset(3).assets {
            let (lo, hi) = asset.condition.score_range();
            assert!((lo..=hi).contains(&asset.condition_score), "{}", asset.id);
            assert_eq!(
                asset.risk_level,
                Severity::from_condition_score(asset.condition_score)
            );
            assert!(asset.last_inspected <= now());
            assert!(asset.next_inspection >= now());
            assert!((asset.coordinates.lat - origin.lat).abs() <= origin.spread_degrees / 2.0);
            assert!((asset.coordinates.lon - origin.lon).abs() <= origin.spread_degrees / 2.0);
            assert!(asset.name.ends_with(&asset.segment));
        }
    }

    #[test]
    fn asset_ids_run_across_types() {
        let data = dataset(4);
        assert_eq!(data.assets.len(), 105);
        assert_eq!(data.assets[0].id, "road-000001");
        assert_eq!(data.assets[30].id, "drain-000031");
        assert_eq!(data.assets[104].id, "building-000105");
    }

    #[test]
    fn work_orders_reference_existing_assets_and_crews() {
        let data = dataset(5);
        let asset_ids: HashSet<&str> = data.assets.iter().map(|a| a.id.as_str()).collect();
        let crew_ids: HashSet<&str> = data.crews.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(data.work_orders.len(), 120);
        for wo in &data.work_orders {
            assert!(asset_ids.contains(wo.asset_id.as_str()), "{}", wo.id);
            assert_eq!(data.asset(&wo.asset_id).unwrap().asset_type, wo.asset_type);
            match &wo.assigned_crew {
                Some(crew) => assert!(crew_ids.contains(crew.as_str()), "{crew}"),
                None => assert_eq!(wo.status, Status::Open),
            }
        }
    }

    #[test]
    fn work_order_sla_fields_are_derived() {
        for wo in dataset(6).work_orders {
            assert_eq!(wo.sla_deadline, wo.created_at + wo.severity.sla_window());
            assert_eq!(wo.sla_status, SlaStatus::evaluate(wo.sla_deadline, now()));
            assert!(!wo.materials.is_empty() && wo.materials.len() <= 3);
            assert!((5_000..=500_000).contains(&wo.cost));
        }
    }

    #[test]
    fn work_order_needs_assets() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate_work_order(&mut rng, 1, &[], 5, now()).unwrap_err();
        assert!(matches!(err, GenerateError::NoAssets));
    }

    #[test]
    fn complaint_assets_share_the_complaint_ward() {
        let data = dataset(7);
        for complaint in &data.complaints {
            if let Some(asset_id) = &complaint.asset_id {
                assert_eq!(data.asset(asset_id).unwrap().ward, complaint.ward);
            }
            assert!(complaint.priority <= Severity::High);
            assert!(complaint.contact.starts_with('0'));
            assert_eq!(complaint.contact.len(), 10);
        }
    }

    #[test]
    fn incidents_only_resolved_when_done() {
        for incident in dataset(8).incidents {
            assert_eq!(incident.resolved_at.is_some(), incident.status.is_done());
            if let Some(resolved) = incident.resolved_at {
                assert!(resolved >= incident.reported_at && resolved <= now());
            }
            assert!((50..=500).contains(&incident.impact_radius));
        }
    }

    #[test]
    fn crews_have_location_only_on_duty() {
        let data = dataset(9);
        assert_eq!(data.crews.last().unwrap().id, "crew-012");
        for crew in data.crews {
            assert_eq!(
                crew.current_location.is_some(),
                crew.availability == Availability::OnDuty
            );
            assert!((2..=4).contains(&crew.members.len()));
        }
    }

    #[test]
    fn same_seed_same_dataset() {
        assert_eq!(dataset(11), dataset(11));
        assert_ne!(dataset(11), dataset(12));
    }

    #[test]
    fn dataset_round_trips_through_disk() {
        let data = dataset(13);
        let path = std::env::temp_dir()
            .join(format!("cmc_infra_generate_{}", std::process::id()))
            .join("dataset.json");
        write_dataset(&data, &path).unwrap();
        let back = read_dataset(&path).unwrap();
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
        assert_eq!(back.work_orders, data.work_orders);
        assert_eq!(back.crews, data.crews);
        assert_eq!(back.wards, data.wards);
        let ids = |d: &MockDataset| d.assets.iter().map(|a| a.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&back), ids(&data));
    }
}
