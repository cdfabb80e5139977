//! USPS abbreviations keyed by the state code used in district identifiers.
//!
//! The historical district identifiers store the two-digit FIPS code
//! left-aligned in a three-character field, so the parsed codes are the FIPS
//! code times ten: Arizona (FIPS 04) appears as 40, Oklahoma (FIPS 40) as 400.

/// `(code, USPS abbreviation)` pairs, ordered by code.
const STATES: &[(i32, &str)] = &[
    (10, "AL"),
    (20, "AK"),
    (40, "AZ"),
    (50, "AR"),
    (60, "CA"),
    (80, "CO"),
    (90, "CT"),
    (100, "DE"),
    (110, "DC"),
    (120, "FL"),
    (130, "GA"),
    (150, "HI"),
    (160, "ID"),
    (170, "IL"),
    (180, "IN"),
    (190, "IA"),
    (200, "KS"),
    (210, "KY"),
    (220, "LA"),
    (230, "ME"),
    (240, "MD"),
    (250, "MA"),
    (260, "MI"),
    (270, "MN"),
    (280, "MS"),
    (290, "MO"),
    (300, "MT"),
    (310, "NE"),
    (320, "NV"),
    (330, "NH"),
    (340, "NJ"),
    (350, "NM"),
    (360, "NY"),
    (370, "NC"),
    (380, "ND"),
    (390, "OH"),
    (400, "OK"),
    (410, "OR"),
    (420, "PA"),
    (440, "RI"),
    (450, "SC"),
    (460, "SD"),
    (470, "TN"),
    (480, "TX"),
    (490, "UT"),
    (500, "VT"),
    (510, "VA"),
    (530, "WA"),
    (540, "WV"),
    (550, "WI"),
    (560, "WY"),
    (600, "AS"),
    (660, "GU"),
    (690, "MP"),
    (720, "PR"),
    (780, "VI"),
];

/// Look up the USPS abbreviation for a parsed state code.
pub fn usps_abbreviation(code: i32) -> Option<&'static str> {
    STATES
        .binary_search_by_key(&code, |&(c, _)| c)
        .ok()
        .map(|i| STATES[i].1)
}
