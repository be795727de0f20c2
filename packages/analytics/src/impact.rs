//! Assets inside an incident's impact radius.
//!
//! Distances are great-circle (haversine) metres between WGS84 points.

use cmc_infra_analytics_models::{ImpactedAsset, IncidentImpact};
use cmc_infra_models::{Coordinates, Incident, MockDataset};
use geo::{Distance, Haversine, Point};

use crate::AnalyticsError;

fn point(c: Coordinates) -> Point<f64> {
    Point::new(c.lon, c.lat)
}

/// Haversine distance in metres between two coordinates.
#[must_use]
pub fn distance_meters(a: Coordinates, b: Coordinates) -> f64 {
    Haversine.distance(point(a), point(b))
}

/// Assets within `incident.impact_radius` metres of the incident, nearest
/// first.
#[must_use]
pub fn assets_within_impact(data: &MockDataset, incident: &Incident) -> IncidentImpact {
    let radius = f64::from(incident.impact_radius);
    let mut assets: Vec<ImpactedAsset> = data
        .assets
        .iter()
        .filter_map(|asset| {
            let distance = distance_meters(incident.coordinates, asset.coordinates);
            (distance <= radius).then(|| ImpactedAsset {
                asset_id: asset.id.clone(),
                asset_type: asset.asset_type,
                name: asset.name.clone(),
                risk_level: asset.risk_level,
                distance_meters: distance,
            })
        })
        .collect();
    assets.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));

    log::debug!(
        "Incident {} impacts {} assets within {}m",
        incident.id,
        assets.len(),
        incident.impact_radius
    );

    IncidentImpact {
        incident_id: incident.id.clone(),
        impact_radius: incident.impact_radius,
        assets,
    }
}

/// [`assets_within_impact`] for the incident with ID `incident_id`.
///
/// # Errors
///
/// Returns [`AnalyticsError::NotFound`] if no such incident exists.
pub fn incident_impact(
    data: &MockDataset,
    incident_id: &str,
) -> Result<IncidentImpact, AnalyticsError> {
    let incident = data
        .incident(incident_id)
        .ok_or_else(|| AnalyticsError::NotFound {
            kind: "incident",
            id: incident_id.to_string(),
        })?;
    Ok(assets_within_impact(data, incident))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::dataset;

    #[test]
    fn one_thousandth_degree_of_latitude_is_about_111_metres() {
        let a = Coordinates {
            lat: 6.9271,
            lon: 79.8612,
        };
        let b = Coordinates {
            lat: 6.9281,
            lon: 79.8612,
        };
        let d = distance_meters(a, b);
        assert!((d - 111.2).abs() < 1.0, "{d}");
        assert!(distance_meters(a, a).abs() < f64::EPSILON);
    }

    #[test]
    fn impacted_assets_are_inside_radius_and_sorted() {
        let data = dataset();
        for incident in &data.incidents {
            let impact = assets_within_impact(&data, incident);
            assert!(
                impact
                    .assets
                    .iter()
                    .all(|a| a.distance_meters <= f64::from(incident.impact_radius))
            );
            assert!(
                impact
                    .assets
                    .windows(2)
                    .all(|w| w[0].distance_meters <= w[1].distance_meters)
            );
        }
    }

    #[test]
    fn incident_at_an_asset_includes_that_asset() {
        let data = dataset();
        // Incidents are placed on an asset in their ward whenever one exists.
        let incident = data
            .incidents
            .iter()
            .find(|i| data.assets.iter().any(|a| a.coordinates == i.coordinates))
            .unwrap();
        let impact = assets_within_impact(&data, incident);
        assert!(impact.assets[0].distance_meters.abs() < 1e-6);
    }

    #[test]
    fn unknown_incident_is_not_found() {
        let data = dataset();
        let err = incident_impact(&data, "inc-999999").unwrap_err();
        assert!(matches!(err, AnalyticsError::NotFound { kind: "incident", .. }));
    }
}
