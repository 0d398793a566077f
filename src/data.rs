//! Compiled-in statistics for each plantation sector.
//!
//! Sources: Central Bank of Sri Lanka annual reports, the Export Development Board and the
//! sector research institutes (2023/24 editions, with 2024/2025 estimates).  The tables are
//! reproduced literally; rounding mismatches between a breakdown and a stated total are kept
//! as published.

/// A single yearly measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YearValue {
    pub year: &'static str,
    pub value: f64,
}

/// A yearly measurement annotated with a status note.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YearStatus {
    pub year: &'static str,
    pub value: f64,
    pub status: &'static str,
}

/// Two measurements for the same year, plotted side by side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YearPair {
    pub year: &'static str,
    pub first: f64,
    pub second: f64,
}

/// A named slice of a breakdown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Share {
    pub name: &'static str,
    pub value: f64,
}

const fn yv(year: &'static str, value: f64) -> YearValue {
    YearValue { year, value }
}

const fn ys(year: &'static str, value: f64, status: &'static str) -> YearStatus {
    YearStatus {
        year,
        value,
        status,
    }
}

const fn yp(year: &'static str, first: f64, second: f64) -> YearPair {
    YearPair {
        year,
        first,
        second,
    }
}

const fn share(name: &'static str, value: f64) -> Share {
    Share { name, value }
}

/// Sums the values of a breakdown.
pub fn total(shares: &[Share]) -> f64 {
    shares.iter().map(|share| share.value).sum()
}

/// Returns whether the years of a series are strictly ascending and contiguous.
pub fn years_are_contiguous<'a, I>(years: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let parsed: Option<Vec<u32>> = years.into_iter().map(|year| year.parse().ok()).collect();
    match parsed {
        Some(years) => years.windows(2).all(|pair| pair[1] == pair[0] + 1),
        None => false,
    }
}

pub mod tea {
    use super::*;

    /// Annual production, Million Kg.
    pub const PRODUCTION: [YearValue; 7] = [
        yv("2019", 300.13),
        yv("2020", 278.49),
        yv("2021", 299.34),
        yv("2022", 251.50),
        yv("2023", 256.04),
        yv("2024", 262.16),
        yv("2025", 264.12),
    ];

    /// Export volume by destination, Million Kg.
    // "Others" was reconciled by hand against the published total; kept verbatim.
    pub const KEY_MARKETS: [Share; 8] = [
        share("Iraq - 39.36", 39.36),
        share("Russia - 21.59", 21.59),
        share("Turkey - 21.27", 21.27),
        share("Libya - 18.93", 18.93),
        share("UAE - 18.32", 18.32),
        share("Chile - 11.09", 11.09),
        share("China - 10.42", 10.42),
        share("Others - 116.46", 116.46),
    ];

    pub const KEY_MARKETS_TOTAL_LABEL: &str = "257.4Million Kg";

    /// Share of production by growing elevation, percent.
    pub const ELEVATION: [Share; 3] = [
        share("Low Grown", 60.0),
        share("High Grown", 22.0),
        share("Mid Grown", 18.0),
    ];

    pub const GROWING_REGIONS: [&str; 6] = [
        "Nuwara Eliya",
        "Uva",
        "Dimbula",
        "Kandy",
        "Ruhuna",
        "Sabaragamuwa",
    ];

    pub const BRAND_TITLE: &str = "Ceylon Tea Brand";
    pub const BRAND_TEXT: &str = "Ceylon tea is one of Sri Lanka\u{2019}s most important agricultural exports, contributing significantly to the economy, providing employment, and enhancing the country\u{2019}s global reputation for high-quality tea. It also supports rural communities and promotes tourism.";

    pub const SOURCES: &str = "CBSL Annual Report 2025, Sri Lanka Tea Board";
}

pub mod coconut {
    use super::*;

    /// Annual production, million nuts.
    pub const PRODUCTION: [YearStatus; 6] = [
        ys("2020", 2792.0, "Stable"),
        ys("2021", 3383.0, "Peak Performance"),
        ys("2022", 3350.0, "Strong"),
        ys("2023", 2950.0, "Decline (Weather impact)"),
        ys("2024", 2750.0, "Five-year Low (Drought)"),
        ys("2025", 2900.0, "Recovery Phase"),
    ];

    /// Product usage, percent of production (2025 estimates).
    pub const USAGE: [Share; 5] = [
        share("Domestic Culinary", 50.0),
        share("Milk & Cream", 22.0),
        share("Coconut Oil", 17.0),
        share("Desiccated Coconut", 8.0),
        share("Other", 3.0),
    ];

    /// Export highlight label and its qualifier.
    pub const EXPORT_HIGHLIGHTS: [(&str, &str); 4] = [
        ("Desiccated", "Premium"),
        ("Virgin Oil", "Trending"),
        ("Coir Fiber", "Industrial"),
        ("Coconut Milk", "Global"),
    ];

    pub const SOURCES: &str =
        "Export Development Board,\n Coconut Development Authority,\n Central Bank of Sri Lanka";
}

pub mod rubber {
    use super::*;

    /// Annual production, Million Kg.
    pub const PRODUCTION: [YearStatus; 7] = [
        ys("2019", 74.7, "Actual"),
        ys("2020", 78.2, "Actual"),
        ys("2021", 76.9, "Actual"),
        ys("2022", 71.0, "Actual"),
        ys("2023", 64.4, "Actual"),
        ys("2024", 69.2, "Updated Actual"),
        ys("2025", 66.5, "Provisional"),
    ];

    /// Export earnings by product, percent.
    pub const EXPORT_PRODUCTS: [Share; 6] = [
        share("Tyres & Tubes", 60.0),
        share("Rubber Gloves", 28.0),
        share("Rubber Auto Parts", 5.0),
        share("Plates, Sheets & Rods", 4.0),
        share("Crepe Rubber (Raw)", 2.0),
        share("Other Products", 1.0),
    ];

    pub const SOLID_TIRES_TITLE: &str = "Global Leader in Solid Tires";
    pub const SOLID_TIRES_TEXT: &str = "Sri Lanka is the world's largest exporter of solid industrial tires, supplying brands like Toyota, Caterpillar, and Camso.";
    pub const SOLID_TIRES_FIGURES: [(&str, &str); 2] =
        [("$1 Bn+", "Export Earnings"), ("Value+", "Focus Strategy")];

    pub const SOURCES: &str = "Rubber Research Institute of Sri Lanka,Sri Lanka Association of Manufacturers and Exporters of Rubber Products";
}

pub mod sugarcane {
    use super::*;

    /// Usage of the harvested cane, percent.
    pub const USAGE: [Share; 5] = [
        share("Sugar (Food & Sweetener)", 65.0),
        share("Bagasse (Energy & Fuel)", 25.0),
        share("Molasses (Ethanol & Alcohol)", 5.0),
        share("Filter Mud (Fertilizer)", 3.0),
        share("Cane Tops/Loss (Animal Feed)", 2.0),
    ];

    /// Cane harvested (`first`) and sugar processed (`second`), metric tonnes.
    pub const TREND: [YearPair; 7] = [
        yp("2019", 653053.0, 57100.0),
        yp("2020", 715000.0, 63400.0),
        yp("2021", 791288.0, 80555.0),
        yp("2022", 767572.0, 78857.0),
        yp("2023", 805616.0, 82000.0),
        yp("2024", 825000.0, 84500.0),
        yp("2025", 840000.0, 86000.0),
    ];

    pub const SOURCES: &str = "Sugarcane Research Institute, Department of Census and Statistics";
}

pub mod cashew {
    use super::*;

    /// Production in metric tonnes (`first`) and cultivated area in hectares (`second`).
    pub const PRODUCTION_AND_AREA: [YearPair; 7] = [
        yp("2019", 12000.0, 16760.0),
        yp("2020", 12250.0, 15620.0),
        yp("2021", 10340.0, 14620.0),
        yp("2022", 18510.0, 15730.0),
        yp("2023", 19800.0, 16100.0),
        yp("2024", 22500.0, 17200.0),
        yp("2025", 24100.0, 18400.0),
    ];

    /// Where the crop goes, percent.
    pub const SUPPLY_GAP: [Share; 2] = [
        share("Local Consumption", 98.5),
        share("Export Market", 1.5),
    ];

    pub const TARGET_NOTE: &str = "Target: 25,000 MT production by 2030";
    pub const BRAND_TITLE: &str = "\"Sri Lankan Cashew\"";
    pub const BRAND_TEXT: &str = "Known globally for its large kernel size and distinct milky taste. It fetches a premium price compared to competitors like Vietnam or India.";

    pub const SOURCES: &str =
        "Sri Lanka Cashew Corporation (SLCC)\n        ,www.plantation.gov.lk\n        ,www.doa.gov.lk";
}

pub mod cover {
    pub const TITLE_LINES: [&str; 2] = ["SRI LANKA'S", "PLANTATION SECTORS"];
    pub const COURSE: &str = "Agribusiness Management (PMT 261-2) Assignment 01";
    pub const AUTHOR: &str = "L.D SEMINI";
    pub const REGISTRATION: &str = "UWU/PMT/23/032";
    pub const AFFILIATION: [&str; 2] = [
        "Plantation Management and Technology",
        "Faculty of Animal Science and Export Agriculture",
    ];
    pub const TERM: &str = "2nd Year 1st Semester";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_roughly_hundred(shares: &[Share]) {
        let sum = total(shares);
        assert!((sum - 100.0).abs() < 0.01, "breakdown sums to {sum}");
    }

    #[test]
    fn percentage_breakdowns_sum_to_one_hundred() {
        assert_roughly_hundred(&tea::ELEVATION);
        assert_roughly_hundred(&coconut::USAGE);
        assert_roughly_hundred(&rubber::EXPORT_PRODUCTS);
        assert_roughly_hundred(&sugarcane::USAGE);
        assert_roughly_hundred(&cashew::SUPPLY_GAP);
    }

    #[test]
    fn key_market_volumes_are_kept_verbatim() {
        let values: Vec<f64> = tea::KEY_MARKETS.iter().map(|share| share.value).collect();
        assert_eq!(
            values,
            vec![39.36, 21.59, 21.27, 18.93, 18.32, 11.09, 10.42, 116.46]
        );
        assert!((total(&tea::KEY_MARKETS) - 257.44).abs() < 1e-9);
    }

    #[test]
    fn year_series_are_contiguous() {
        assert!(years_are_contiguous(tea::PRODUCTION.iter().map(|r| r.year)));
        assert!(years_are_contiguous(coconut::PRODUCTION.iter().map(|r| r.year)));
        assert!(years_are_contiguous(rubber::PRODUCTION.iter().map(|r| r.year)));
        assert!(years_are_contiguous(sugarcane::TREND.iter().map(|r| r.year)));
        assert!(years_are_contiguous(
            cashew::PRODUCTION_AND_AREA.iter().map(|r| r.year)
        ));
    }

    #[test]
    fn contiguity_check_rejects_gaps_and_garbage() {
        assert!(!years_are_contiguous(["2019", "2021"]));
        assert!(!years_are_contiguous(["2020", "twenty"]));
        assert!(years_are_contiguous(std::iter::empty()));
    }
}
