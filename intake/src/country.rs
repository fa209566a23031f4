//! Countries offered on the identity step and their region lists.

use std::fmt;

/// The countries a respondent can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Country {
    UnitedStates,
    Canada,
    UnitedKingdom,
    Australia,
    Germany,
    France,
    India,
    Japan,
    Other,
}

impl Country {
    pub const ALL: [Country; 9] = [
        Country::UnitedStates,
        Country::Canada,
        Country::UnitedKingdom,
        Country::Australia,
        Country::Germany,
        Country::France,
        Country::India,
        Country::Japan,
        Country::Other,
    ];

    /// The stored and displayed name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnitedStates => "United States",
            Self::Canada => "Canada",
            Self::UnitedKingdom => "United Kingdom",
            Self::Australia => "Australia",
            Self::Germany => "Germany",
            Self::France => "France",
            Self::India => "India",
            Self::Japan => "Japan",
            Self::Other => "Other",
        }
    }

    /// Look a country up by its stored name.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Whether a state / region must be picked for this country.
    pub fn requires_region(&self) -> bool {
        matches!(self, Self::UnitedStates | Self::India)
    }

    /// The selectable regions; empty when the country has no region picker.
    pub fn regions(&self) -> &'static [&'static str] {
        match self {
            Self::UnitedStates => US_STATES,
            Self::India => INDIAN_STATES,
            _ => &[],
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const US_STATES: &[&str] = &[
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
    "District of Columbia",
];

const INDIAN_STATES: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Andaman and Nicobar Islands",
    "Chandigarh",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Lakshadweep",
    "Puducherry",
];
