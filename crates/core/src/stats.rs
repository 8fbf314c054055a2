//! Run counters for data-quality reporting.
//!
//! Counters never influence extraction. Each page produces its own
//! [`ParseStats`]; runs combine them with `+=`.

use std::ops::AddAssign;

use serde::Serialize;

use crate::patterns::Field;

/// Additive counters accumulated across one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub pages_parsed: usize,
    /// Pages that contained bytes outside UTF-8 and were read lossily.
    pub pages_lossy: usize,
    pub emails_parsed: usize,
    pub properties_found: usize,
    pub missing_price: usize,
    pub missing_beds: usize,
    pub missing_baths: usize,
    pub missing_sqft: usize,
    pub missing_link: usize,
    pub missing_city: usize,
    pub missing_zip: usize,
    pub missing_type: usize,
    pub missing_address: usize,
    pub missing_status: usize,
    pub missing_open_house: usize,
    pub missing_builder: usize,
}

impl ParseStats {
    /// Count a miss for one recognizer field.
    pub fn record_miss(&mut self, field: Field) {
        let counter = match field {
            Field::Price => &mut self.missing_price,
            Field::Beds => &mut self.missing_beds,
            Field::Baths => &mut self.missing_baths,
            Field::Sqft => &mut self.missing_sqft,
            Field::Zip => &mut self.missing_zip,
            Field::City => &mut self.missing_city,
            Field::PropertyType => &mut self.missing_type,
            Field::Address => &mut self.missing_address,
            Field::Status => &mut self.missing_status,
            Field::OpenHouse => &mut self.missing_open_house,
            Field::Builder => &mut self.missing_builder,
        };
        *counter += 1;
    }

    /// Total misses over every field and the link.
    pub fn total_missing(&self) -> usize {
        self.entries().iter().filter(|(name, _)| name.starts_with("missing_")).map(|(_, n)| n).sum()
    }

    /// Counter names and values, in a stable order.
    pub fn entries(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("pages_parsed", self.pages_parsed),
            ("pages_lossy", self.pages_lossy),
            ("emails_parsed", self.emails_parsed),
            ("properties_found", self.properties_found),
            ("missing_price", self.missing_price),
            ("missing_beds", self.missing_beds),
            ("missing_baths", self.missing_baths),
            ("missing_sqft", self.missing_sqft),
            ("missing_link", self.missing_link),
            ("missing_city", self.missing_city),
            ("missing_zip", self.missing_zip),
            ("missing_type", self.missing_type),
            ("missing_address", self.missing_address),
            ("missing_status", self.missing_status),
            ("missing_open_house", self.missing_open_house),
            ("missing_builder", self.missing_builder),
        ]
    }
}

impl AddAssign for ParseStats {
    fn add_assign(&mut self, other: Self) {
        self.pages_parsed += other.pages_parsed;
        self.pages_lossy += other.pages_lossy;
        self.emails_parsed += other.emails_parsed;
        self.properties_found += other.properties_found;
        self.missing_price += other.missing_price;
        self.missing_beds += other.missing_beds;
        self.missing_baths += other.missing_baths;
        self.missing_sqft += other.missing_sqft;
        self.missing_link += other.missing_link;
        self.missing_city += other.missing_city;
        self.missing_zip += other.missing_zip;
        self.missing_type += other.missing_type;
        self.missing_address += other.missing_address;
        self.missing_status += other.missing_status;
        self.missing_open_house += other.missing_open_house;
        self.missing_builder += other.missing_builder;
    }
}
