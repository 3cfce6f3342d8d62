use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropKind {
    Bean,
    Corn,
    Soybean,
    Cotton,
    Sunflower,
    Tomato,
    Potato,
    Other,
}

impl CropKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropKind::Bean => "Bean",
            CropKind::Corn => "Corn",
            CropKind::Soybean => "Soybean",
            CropKind::Cotton => "Cotton",
            CropKind::Sunflower => "Sunflower",
            CropKind::Tomato => "Tomato",
            CropKind::Potato => "Potato",
            CropKind::Other => "Other",
        }
    }

    pub fn all() -> &'static [CropKind] {
        &[
            CropKind::Bean,
            CropKind::Corn,
            CropKind::Soybean,
            CropKind::Cotton,
            CropKind::Sunflower,
            CropKind::Tomato,
            CropKind::Potato,
            CropKind::Other,
        ]
    }

    /// Accepts English names and the wizard's Portuguese option values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bean" | "beans" | "feijao" | "feijão" => Some(CropKind::Bean),
            "corn" | "maize" | "milho" => Some(CropKind::Corn),
            "soybean" | "soy" | "soja" => Some(CropKind::Soybean),
            "cotton" | "algodao" | "algodão" => Some(CropKind::Cotton),
            "sunflower" | "girassol" => Some(CropKind::Sunflower),
            "tomato" | "tomate" => Some(CropKind::Tomato),
            "potato" | "batata" => Some(CropKind::Potato),
            "other" | "outro" | "outros" | "outra" => Some(CropKind::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for CropKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilKind {
    Sandy,
    SandyLoam,
    Loam,
    ClayLoam,
    SiltyClay,
    Clay,
}

impl SoilKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilKind::Sandy => "Sandy",
            SoilKind::SandyLoam => "Sandy Loam",
            SoilKind::Loam => "Loam",
            SoilKind::ClayLoam => "Clay Loam",
            SoilKind::SiltyClay => "Silty Clay",
            SoilKind::Clay => "Clay",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sandy" | "sand" | "arenoso" => Some(SoilKind::Sandy),
            "sandyloam" | "sandy loam" | "sandy_loam" | "franco_arenoso" | "franco-arenoso" => {
                Some(SoilKind::SandyLoam)
            }
            "loam" | "medio" | "médio" | "franco" => Some(SoilKind::Loam),
            "clayloam" | "clay loam" | "clay_loam" | "franco_argiloso" | "franco-argiloso" => {
                Some(SoilKind::ClayLoam)
            }
            "siltyclay" | "silty clay" | "silty_clay" | "argilo_siltoso" | "argilo-siltoso" => {
                Some(SoilKind::SiltyClay)
            }
            "clay" | "argiloso" => Some(SoilKind::Clay),
            _ => None,
        }
    }
}

impl std::fmt::Display for SoilKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemKind {
    FixedSprinkler,
    CenterPivot,
    Drip,
}

impl SystemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemKind::FixedSprinkler => "Fixed Sprinkler",
            SystemKind::CenterPivot => "Center Pivot",
            SystemKind::Drip => "Drip",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fixedsprinkler" | "fixed sprinkler" | "fixed_sprinkler" | "fixed-sprinkler" | "sprinkler"
            | "aspersao" | "aspersão" | "aspersao_fixa" => Some(SystemKind::FixedSprinkler),
            "centerpivot" | "center pivot" | "center_pivot" | "center-pivot" | "pivot" | "pivo" | "pivô"
            | "pivo_central" => Some(SystemKind::CenterPivot),
            "drip" | "gotejamento" => Some(SystemKind::Drip),
            _ => None,
        }
    }
}

impl std::fmt::Display for SystemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
