use crate::Company;

/// `(symbol, name)` pairs of the DAX 40 constituents offered for analysis.
pub const DAX40: &[(&str, &str)] = &[
    ("ADS", "adidas"),
    ("AIR", "Airbus"),
    ("ALV", "Allianz"),
    ("BAS", "BASF"),
    ("BAYN", "Bayer"),
    ("BEI", "Beiersdorf"),
    ("BMW", "BMW"),
    ("BNR", "Brenntag"),
    ("CBK", "Commerzbank"),
    ("1COV", "Covestro"),
    ("DTG", "Daimler Truck"),
    ("DBK", "Deutsche Bank"),
    ("DB1", "Deutsche Börse"),
    ("DHL", "DHL Group"),
    ("DTE", "Deutsche Telekom"),
    ("EOAN", "E.ON"),
    ("FRE", "Fresenius"),
    ("FME", "Fresenius Medical Care"),
    ("HNR1", "Hannover Rück"),
    ("HEI", "Heidelberg Materials"),
    ("HEN3", "Henkel"),
    ("IFX", "Infineon Technologies"),
    ("MBG", "Mercedes-Benz Group"),
    ("MRK", "Merck"),
    ("MTX", "MTU Aero Engines"),
    ("MUV2", "Munich Re"),
    ("P911", "Porsche AG"),
    ("PAH3", "Porsche SE"),
    ("QIA", "Qiagen"),
    ("RHM", "Rheinmetall"),
    ("RWE", "RWE"),
    ("SAP", "SAP"),
    ("SRT3", "Sartorius"),
    ("SIE", "Siemens"),
    ("ENR", "Siemens Energy"),
    ("SHL", "Siemens Healthineers"),
    ("SY1", "Symrise"),
    ("VOW3", "Volkswagen"),
    ("VNA", "Vonovia"),
    ("ZAL", "Zalando"),
];

/// All DAX 40 companies, in index order.
#[must_use]
pub fn dax40() -> Vec<Company> {
    DAX40
        .iter()
        .map(|(symbol, name)| Company::new(*symbol, *name))
        .collect()
}

/// Look up a DAX 40 company by ticker, ignoring ASCII case.
#[must_use]
pub fn by_symbol(symbol: &str) -> Option<Company> {
    DAX40
        .iter()
        .find(|(s, _)| s.eq_ignore_ascii_case(symbol.trim()))
        .map(|(s, n)| Company::new(*s, *n))
}
