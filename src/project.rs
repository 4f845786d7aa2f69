use crate::labor::LaborCategory;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Roadbed,
    Bridge,
    Pavement,
    Tunnel,
    Building,
}

impl ProjectType {
    pub const ALL: [ProjectType; 5] = [
        ProjectType::Roadbed,
        ProjectType::Bridge,
        ProjectType::Pavement,
        ProjectType::Tunnel,
        ProjectType::Building,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Roadbed => "roadbed",
            ProjectType::Bridge => "bridge",
            ProjectType::Pavement => "pavement",
            ProjectType::Tunnel => "tunnel",
            ProjectType::Building => "building",
        }
    }

    pub fn name_zh(&self) -> &'static str {
        match self {
            ProjectType::Roadbed => "路基工程",
            ProjectType::Bridge => "桥梁工程",
            ProjectType::Pavement => "路面工程",
            ProjectType::Tunnel => "隧道工程",
            ProjectType::Building => "房建工程",
        }
    }

    /// Construction phases of this project type, in display order.
    pub fn modules(&self) -> &'static [&'static str] {
        match self {
            ProjectType::Roadbed => &["路基填筑开挖阶段", "路基防排水阶段"],
            ProjectType::Bridge => &[
                "基础施工阶段",
                "墩柱施工阶段",
                "梁板预制及安装阶段",
                "桥面系及附属施工阶段",
            ],
            ProjectType::Pavement => &["路面基层施工阶段", "路面面层施工阶段"],
            ProjectType::Tunnel => &["洞口工程", "初支工程", "二衬工程", "附属工程"],
            ProjectType::Building => &[
                "基础施工阶段",
                "主体施工阶段",
                "装饰装修施工阶段",
                "机电安装工程",
            ],
        }
    }

    pub fn categories(&self) -> &'static [LaborCategory] {
        match self {
            ProjectType::Tunnel => &LaborCategory::TUNNEL,
            _ => &LaborCategory::GENERAL,
        }
    }

    pub fn has_module(&self, name: &str) -> bool {
        self.modules().contains(&name)
    }

    pub fn uses_category(&self, category: LaborCategory) -> bool {
        self.categories().contains(&category)
    }

    /// Underground work continues through the cold season.
    pub fn supports_winter_break(&self) -> bool {
        !matches!(self, ProjectType::Tunnel)
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name_zh())
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ProjectType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(needle) || t.name_zh() == needle)
            .ok_or_else(|| format!("unknown project type '{needle}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tunnel_uses_tunnel_categories() {
        assert!(ProjectType::Tunnel.uses_category(LaborCategory::Shotcrete));
        assert!(!ProjectType::Tunnel.uses_category(LaborCategory::Electrician));
        assert!(ProjectType::Bridge.uses_category(LaborCategory::Electrician));
        assert!(!ProjectType::Bridge.uses_category(LaborCategory::Driver));
    }

    #[test]
    fn module_lists_match_project_types() {
        assert_eq!(ProjectType::Roadbed.modules().len(), 2);
        assert_eq!(ProjectType::Bridge.modules().len(), 4);
        assert!(ProjectType::Building.has_module("机电安装工程"));
        assert!(!ProjectType::Pavement.has_module("机电安装工程"));
    }

    #[test]
    fn parses_both_spellings() {
        assert_eq!("tunnel".parse::<ProjectType>(), Ok(ProjectType::Tunnel));
        assert_eq!("桥梁工程".parse::<ProjectType>(), Ok(ProjectType::Bridge));
        assert!(!ProjectType::Tunnel.supports_winter_break());
    }
}
