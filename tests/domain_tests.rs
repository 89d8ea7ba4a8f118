use searoute_tracker::domains::shipment_tracking::*;
use searoute_tracker::DomainError;
use serde_json::{json, Map, Value};

fn point(lat: f64, lon: f64) -> RoutePoint {
    RoutePoint { latitude: lat, longitude: lon, extra: Map::new() }
}

fn shipment(value: Value) -> Shipment {
    Shipment::from_value(&value).unwrap()
}

#[test]
fn test_selector_empty_history_always_processed() {
    let empty: Vec<Value> = Vec::new();
    assert!(should_process(&empty, "in_transit"));
    assert!(should_process(&empty, "delivered"));
    assert!(should_process(&empty, ""));
}

#[test]
fn test_selector_history_requires_in_transit() {
    let completed = vec![point(1.0, 1.0)];
    assert!(should_process(&completed, "in_transit"));
    assert!(!should_process(&completed, "delivered"));
    assert!(!should_process(&completed, "IN_TRANSIT"));
    assert!(!should_process(&completed, ""));
}

#[test]
fn test_route_request_from_complete_shipment() {
    let s = shipment(json!({
        "shipment_id": "SHP-1",
        "current_position": {"latitude": 1.5, "longitude": 103.8},
        "route_info": {"destination": {"name": "Rotterdam", "coordinates": {"latitude": 51.9, "longitude": 4.1}}}
    }));

    let req = RouteRequest::from_shipment(&s).unwrap();
    assert_eq!(req.origin, Coordinate::new(103.8, 1.5));
    assert_eq!(req.destination, Coordinate::new(4.1, 51.9));
}

#[test]
fn test_route_request_reports_every_missing_value() {
    let s = shipment(json!({
        "shipment_order_number": "ORD-7",
        "current_position": {"latitude": 1.5},
        "route_info": {}
    }));

    match RouteRequest::from_shipment(&s) {
        Err(DomainError::MissingInput { shipment_id, missing }) => {
            assert_eq!(shipment_id, "ORD-7");
            assert!(missing.contains("origin longitude"));
            assert!(missing.contains("destination latitude"));
            assert!(missing.contains("destination longitude"));
            assert!(!missing.contains("origin latitude"));
        }
        other => panic!("Expected MissingInput error, got {:?}", other),
    }
}

#[test]
fn test_coordinate_conversions_are_inverse() {
    let c = Coordinate::from_lon_lat([-73.9, 40.7]);
    assert_eq!(c.longitude, -73.9);
    assert_eq!(c.latitude, 40.7);
    assert_eq!(c.to_lon_lat(), [-73.9, 40.7]);

    let labeled = RoutePoint::from(c);
    assert_eq!(labeled.latitude, 40.7);
    assert_eq!(labeled.longitude, -73.9);
    assert_eq!(Coordinate::from(&labeled), c);

    let LatLon(lat, lon) = c.to_lat_lon();
    assert_eq!((lat, lon), (40.7, -73.9));
}

#[test]
fn test_document_preserves_unknown_fields() {
    let raw = json!({
        "generated_at": "2024-05-01T00:00:00Z",
        "shipments": [{
            "shipment_id": "SHP-1",
            "carrier": "Maersk",
            "shipment_status": "delivered",
            "route_coordinates": {
                "completed_route": [{"latitude": 1.0, "longitude": 2.0, "timestamp": "t0"}],
                "source": "ais"
            }
        }]
    });

    let doc = TrackingDocument::from_value(raw.clone()).unwrap();
    let s = doc.shipment(0).unwrap().unwrap();
    assert_eq!(s.display_id(), "SHP-1");
    assert_eq!(s.completed_route().len(), 1);
    assert_eq!(s.last_completed(), Some(Coordinate::new(2.0, 1.0)));
    assert!(s.remaining_route().is_none());

    assert_eq!(doc.into_value(), raw);
}

#[test]
fn test_wrongly_typed_coordinates_read_as_missing() {
    let s = shipment(json!({
        "shipment_id": 4711,
        "current_position": {"latitude": "1.5", "longitude": 103},
        "route_info": {"destination": {"coordinates": null}}
    }));
    assert_eq!(s.display_id(), "4711");
    assert_eq!(s.current_position, Some(GeoPoint { latitude: None, longitude: Some(103.0) }));
    assert!(s.destination().is_none());

    match RouteRequest::from_shipment(&s) {
        Err(DomainError::MissingInput { missing, .. }) => {
            assert_eq!(missing, "origin latitude, destination latitude, destination longitude");
        }
        other => panic!("Expected MissingInput error, got {:?}", other),
    }
}

#[test]
fn test_history_entries_count_even_when_unreadable() {
    let s = shipment(json!({
        "shipment_status": "delivered",
        "route_coordinates": {"completed_route": [{"latitude": 1.0, "longitude": null}, "junk"]}
    }));
    assert_eq!(s.completed_route().len(), 2);
    assert!(s.last_completed().is_none());
    assert!(!should_process(s.completed_route(), s.status()));
}

#[test]
fn test_uninterpretable_route_container_is_rejected() {
    for bad in [
        json!({"shipment_id": "SHP-X", "route_coordinates": "n/a"}),
        json!({"shipment_id": "SHP-X", "route_coordinates": {"completed_route": 3}}),
    ] {
        match Shipment::from_value(&bad) {
            Err(DomainError::MalformedShipment { shipment_id, .. }) => assert_eq!(shipment_id, "SHP-X"),
            other => panic!("Expected MalformedShipment error, got {:?}", other),
        }
    }
    assert!(Shipment::from_value(&json!(["not", "a", "record"])).is_err());
}

#[test]
fn test_set_remaining_route_creates_missing_container() {
    let mut record = json!({"shipment_id": "SHP-2"});
    assert!(shipment(record.clone()).completed_route().is_empty());

    set_remaining_route(&mut record, &[Coordinate::new(1.0, 2.0), Coordinate::new(3.0, 4.0)]).unwrap();
    let s = shipment(record.clone());
    assert_eq!(s.remaining_route().unwrap(), &[point(2.0, 1.0), point(4.0, 3.0)]);
    assert_eq!(
        record["route_coordinates"]["remaining_route"],
        json!([{"latitude": 2.0, "longitude": 1.0}, {"latitude": 4.0, "longitude": 3.0}])
    );
}

#[test]
fn test_set_remaining_route_replaces_in_place() {
    let mut record = json!({
        "route_coordinates": {"remaining_route": [], "completed_route": [], "source": "ais"}
    });
    set_remaining_route(&mut record, &[Coordinate::new(1.0, 2.0)]).unwrap();

    let keys: Vec<&str> = record["route_coordinates"].as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["remaining_route", "completed_route", "source"]);

    let mut bad = json!({"route_coordinates": 5});
    assert!(set_remaining_route(&mut bad, &[Coordinate::new(1.0, 2.0)]).is_err());
    assert_eq!(bad, json!({"route_coordinates": 5}));
}
