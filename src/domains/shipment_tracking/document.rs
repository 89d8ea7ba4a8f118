use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::{DomainError, DomainResult};

use super::types::Coordinate;

/// The persisted shipment-tracking document.
///
/// Held as raw JSON so that a rewrite only touches the remaining routes the
/// run replaced: key order, number formatting and foreign fields of every
/// other value come back exactly as they were read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingDocument {
    root: Map<String, Value>,
}

impl TrackingDocument {
    pub fn from_value(value: Value) -> DomainResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Raw shipment records; empty when `shipments` is absent or not a list.
    pub fn shipments(&self) -> &[Value] {
        match self.root.get("shipments") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }

    pub fn shipments_mut(&mut self) -> &mut [Value] {
        match self.root.get_mut("shipments") {
            Some(Value::Array(items)) => items.as_mut_slice(),
            _ => Default::default(),
        }
    }

    /// Typed view of the shipment at `index`.
    pub fn shipment(&self, index: usize) -> Option<DomainResult<Shipment>> {
        self.shipments().get(index).map(Shipment::from_value)
    }
}

/// Read-only view of one shipment record.
///
/// Decoding is lenient: a field of the wrong JSON type reads as absent, so a
/// bad value surfaces as missing input for that shipment alone. Only a record
/// whose route containers cannot be interpreted at all is rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shipment {
    pub shipment_id: Option<String>,
    pub shipment_order_number: Option<String>,
    pub shipment_status: Option<String>,
    pub current_position: Option<GeoPoint>,
    pub destination: Option<GeoPoint>,
    /// Recorded history entries; only their count drives selection.
    pub completed_route: Vec<Value>,
    pub remaining_route: Option<Vec<RoutePoint>>,
}

/// A labeled position whose fields may be absent in the source data.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeoPoint {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GeoPoint {
    pub fn from_value(value: &Value) -> Self {
        Self {
            latitude: value.get("latitude").and_then(Value::as_f64),
            longitude: value.get("longitude").and_then(Value::as_f64),
        }
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.longitude?, self.latitude?))
    }
}

/// Labeled-field form of a route vertex as stored in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Coordinate> for RoutePoint {
    fn from(c: Coordinate) -> Self {
        Self {
            latitude: c.latitude,
            longitude: c.longitude,
            extra: Map::new(),
        }
    }
}

impl From<&RoutePoint> for Coordinate {
    fn from(p: &RoutePoint) -> Self {
        Coordinate::new(p.longitude, p.latitude)
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Treats `null` like an absent key.
fn present<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| !v.is_null())
}

impl Shipment {
    pub fn from_value(value: &Value) -> DomainResult<Self> {
        let Some(record) = value.as_object() else {
            return Err(DomainError::MalformedShipment {
                shipment_id: "<unknown>".to_string(),
                reason: "record is not an object".to_string(),
            });
        };

        let mut shipment = Shipment {
            shipment_id: text(record.get("shipment_id")),
            shipment_order_number: text(record.get("shipment_order_number")),
            shipment_status: record
                .get("shipment_status")
                .and_then(Value::as_str)
                .map(str::to_string),
            current_position: present(record, "current_position").map(GeoPoint::from_value),
            destination: record
                .get("route_info")
                .and_then(|info| info.get("destination"))
                .and_then(|dest| dest.get("coordinates"))
                .filter(|c| !c.is_null())
                .map(GeoPoint::from_value),
            ..Default::default()
        };

        let Some(container) = present(record, "route_coordinates") else {
            return Ok(shipment);
        };
        let Some(container) = container.as_object() else {
            return Err(shipment.malformed("route_coordinates is not an object"));
        };
        match present(container, "completed_route") {
            None => {}
            Some(Value::Array(items)) => shipment.completed_route = items.clone(),
            Some(_) => return Err(shipment.malformed("completed_route is not a list")),
        }
        shipment.remaining_route = present(container, "remaining_route")
            .and_then(|v| serde_json::from_value(v.clone()).ok());
        Ok(shipment)
    }

    /// Identifier used in diagnostics; falls back to the order number.
    pub fn display_id(&self) -> &str {
        self.shipment_id
            .as_deref()
            .or(self.shipment_order_number.as_deref())
            .unwrap_or("<unknown>")
    }

    pub fn status(&self) -> &str {
        self.shipment_status.as_deref().unwrap_or("")
    }

    pub fn completed_route(&self) -> &[Value] {
        &self.completed_route
    }

    /// Last history entry that carries both coordinates.
    pub fn last_completed(&self) -> Option<Coordinate> {
        self.completed_route
            .last()
            .and_then(|p| GeoPoint::from_value(p).coordinate())
    }

    pub fn remaining_route(&self) -> Option<&[RoutePoint]> {
        self.remaining_route.as_deref()
    }

    pub fn destination(&self) -> Option<&GeoPoint> {
        self.destination.as_ref()
    }

    fn malformed(&self, reason: &str) -> DomainError {
        DomainError::MalformedShipment {
            shipment_id: self.display_id().to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Overwrite `route_coordinates.remaining_route` of a raw shipment record,
/// creating the container if it is absent. Every other key is left in place.
pub fn set_remaining_route(record: &mut Value, route: &[Coordinate]) -> DomainResult<()> {
    let points: Vec<RoutePoint> = route.iter().copied().map(RoutePoint::from).collect();
    let points = serde_json::to_value(points)?;

    let Some(record) = record.as_object_mut() else {
        return Err(DomainError::MalformedShipment {
            shipment_id: "<unknown>".to_string(),
            reason: "record is not an object".to_string(),
        });
    };
    let id = text(record.get("shipment_id")).unwrap_or_else(|| "<unknown>".to_string());
    let container = record
        .entry("route_coordinates")
        .or_insert_with(|| Value::Object(Map::new()));
    if container.is_null() {
        *container = Value::Object(Map::new());
    }
    match container.as_object_mut() {
        Some(container) => {
            container.insert("remaining_route".to_string(), points);
            Ok(())
        }
        None => Err(DomainError::MalformedShipment {
            shipment_id: id,
            reason: "route_coordinates is not an object".to_string(),
        }),
    }
}
