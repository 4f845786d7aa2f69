use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Labor categories (工种). Declaration order is the row order of every exported plan:
/// the general set first, then the categories only tunnel projects use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LaborCategory {
    #[serde(rename = "模板工")]
    Formwork,
    #[serde(rename = "混凝土工")]
    Concrete,
    #[serde(rename = "钢筋工")]
    Rebar,
    #[serde(rename = "支架工")]
    Scaffold,
    #[serde(rename = "测量工")]
    Survey,
    #[serde(rename = "电焊工")]
    Welding,
    #[serde(rename = "泥瓦工")]
    Mason,
    #[serde(rename = "电工")]
    Electrician,
    #[serde(rename = "普工")]
    Laborer,
    #[serde(rename = "出渣工")]
    Mucking,
    #[serde(rename = "防水工")]
    Waterproofing,
    #[serde(rename = "开挖工")]
    Excavation,
    #[serde(rename = "喷砼工")]
    Shotcrete,
    #[serde(rename = "普通工")]
    GeneralWorker,
    #[serde(rename = "司机")]
    Driver,
    #[serde(rename = "支护工")]
    Support,
}

impl LaborCategory {
    /// Superset of both category sets, in output order.
    pub const ALL: [LaborCategory; 16] = [
        LaborCategory::Formwork,
        LaborCategory::Concrete,
        LaborCategory::Rebar,
        LaborCategory::Scaffold,
        LaborCategory::Survey,
        LaborCategory::Welding,
        LaborCategory::Mason,
        LaborCategory::Electrician,
        LaborCategory::Laborer,
        LaborCategory::Mucking,
        LaborCategory::Waterproofing,
        LaborCategory::Excavation,
        LaborCategory::Shotcrete,
        LaborCategory::GeneralWorker,
        LaborCategory::Driver,
        LaborCategory::Support,
    ];

    pub const GENERAL: [LaborCategory; 9] = [
        LaborCategory::Formwork,
        LaborCategory::Concrete,
        LaborCategory::Rebar,
        LaborCategory::Scaffold,
        LaborCategory::Survey,
        LaborCategory::Welding,
        LaborCategory::Mason,
        LaborCategory::Electrician,
        LaborCategory::Laborer,
    ];

    pub const TUNNEL: [LaborCategory; 11] = [
        LaborCategory::Mucking,
        LaborCategory::Waterproofing,
        LaborCategory::Rebar,
        LaborCategory::Concrete,
        LaborCategory::Excavation,
        LaborCategory::Formwork,
        LaborCategory::Shotcrete,
        LaborCategory::GeneralWorker,
        LaborCategory::Driver,
        LaborCategory::Support,
        LaborCategory::Welding,
    ];

    pub fn name_zh(&self) -> &'static str {
        match self {
            LaborCategory::Formwork => "模板工",
            LaborCategory::Concrete => "混凝土工",
            LaborCategory::Rebar => "钢筋工",
            LaborCategory::Scaffold => "支架工",
            LaborCategory::Survey => "测量工",
            LaborCategory::Welding => "电焊工",
            LaborCategory::Mason => "泥瓦工",
            LaborCategory::Electrician => "电工",
            LaborCategory::Laborer => "普工",
            LaborCategory::Mucking => "出渣工",
            LaborCategory::Waterproofing => "防水工",
            LaborCategory::Excavation => "开挖工",
            LaborCategory::Shotcrete => "喷砼工",
            LaborCategory::GeneralWorker => "普通工",
            LaborCategory::Driver => "司机",
            LaborCategory::Support => "支护工",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LaborCategory::Formwork => "formwork",
            LaborCategory::Concrete => "concrete",
            LaborCategory::Rebar => "rebar",
            LaborCategory::Scaffold => "scaffold",
            LaborCategory::Survey => "survey",
            LaborCategory::Welding => "welding",
            LaborCategory::Mason => "mason",
            LaborCategory::Electrician => "electrician",
            LaborCategory::Laborer => "laborer",
            LaborCategory::Mucking => "mucking",
            LaborCategory::Waterproofing => "waterproofing",
            LaborCategory::Excavation => "excavation",
            LaborCategory::Shotcrete => "shotcrete",
            LaborCategory::GeneralWorker => "general_worker",
            LaborCategory::Driver => "driver",
            LaborCategory::Support => "support",
        }
    }

    /// Pre-filled manual headcount shown for a category before the user edits it.
    pub fn default_headcount(&self) -> u32 {
        match self {
            LaborCategory::Formwork => 80,
            LaborCategory::Concrete => 90,
            LaborCategory::Rebar => 100,
            LaborCategory::Scaffold => 40,
            LaborCategory::Survey => 10,
            LaborCategory::Welding => 35,
            LaborCategory::Mason => 25,
            LaborCategory::Electrician => 5,
            LaborCategory::Laborer => 50,
            LaborCategory::Mucking => 60,
            LaborCategory::Waterproofing => 30,
            LaborCategory::Excavation => 100,
            LaborCategory::Shotcrete => 90,
            LaborCategory::GeneralWorker => 70,
            LaborCategory::Driver => 30,
            LaborCategory::Support => 30,
        }
    }
}

impl fmt::Display for LaborCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name_zh())
    }
}

impl FromStr for LaborCategory {
    type Err = String;

    /// Accepts either the Chinese name or the snake_case English key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        LaborCategory::ALL
            .iter()
            .copied()
            .find(|category| {
                category.name_zh() == needle || category.as_str().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| format!("unknown labor category '{needle}'"))
    }
}
