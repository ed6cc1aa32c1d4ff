use std::fmt;

use serde::{Deserialize, Serialize};

const PROVINCES: &[&str] = &["DKI Jakarta", "Jawa Barat", "Jawa Tengah"];
const DISTRICTS: &[&str] = &["Jakarta Selatan", "Jakarta Pusat", "Jakarta Timur"];
const SUB_DISTRICTS: &[&str] = &["Kebayoran Baru", "Menteng", "Kuningan"];

/// The three administrative dropdowns on the location step.
///
/// Each level offers a fixed option list. The levels are not nested: any
/// district may be picked with any province, and none of them constrain the
/// map center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationLevel {
    Province,
    District,
    SubDistrict,
}

impl LocationLevel {
    pub const ALL: [LocationLevel; 3] = [
        LocationLevel::Province,
        LocationLevel::District,
        LocationLevel::SubDistrict,
    ];

    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Self::Province => PROVINCES,
            Self::District => DISTRICTS,
            Self::SubDistrict => SUB_DISTRICTS,
        }
    }

    /// Placeholder shown on the dropdown.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Province => "Provinsi",
            Self::District => "Kota/Kabupaten",
            Self::SubDistrict => "Kecamatan",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Province => "province",
            Self::District => "district",
            Self::SubDistrict => "sub_district",
        }
    }

    pub fn is_offered(&self, value: &str) -> bool {
        self.options().contains(&value)
    }
}

impl fmt::Display for LocationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
