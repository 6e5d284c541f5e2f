use crate::facilities::{Contact, FacilityCategory, FacilityRecord};
use crate::geo::GeoPoint;
use crate::hours::WeeklyHours;

pub(crate) fn facility(id: &str, category: FacilityCategory, lat: f64, lng: f64) -> FacilityRecord {
    FacilityRecord {
        id: id.to_string(),
        name: format!("Facility {id}"),
        category,
        address: "Kiambu Town, Kiambu County".to_string(),
        location: GeoPoint::new(lat, lng),
        contact: Contact {
            phone: "+254 700 000 000".to_string(),
            email: format!("info@facility{id}.co.ke"),
            website: None,
        },
        hours: WeeklyHours::every_day("8:00 AM - 5:00 PM"),
        services: vec!["Outpatient".to_string()],
        rating: Some(4.0),
        emergency: false,
        image: None,
    }
}
