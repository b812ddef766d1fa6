//! Crop-specific precaution generation
//!
//! A static catalog of sixteen crops, each with an ordered table of
//! conditional precautions. Tables are data, not branching code: every rule
//! whose predicate holds fires, so one snapshot can produce several
//! precautions for the same crop. A universal storm rule precedes all crop
//! tables, and a favourable-conditions fallback covers the no-match case.

use crate::advisory::code;
use crate::models::{CurrentConditions, WeatherSnapshot};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog entry for a selectable crop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
}

/// The sixteen crops supported by the advisory
pub const CROP_CATALOG: [CropProfile; 16] = [
    CropProfile { id: "wheat", name: "Wheat", emoji: "🌾" },
    CropProfile { id: "rice", name: "Rice", emoji: "🍚" },
    CropProfile { id: "cotton", name: "Cotton", emoji: "🪴" },
    CropProfile { id: "maize", name: "Maize", emoji: "🌽" },
    CropProfile { id: "tomato", name: "Tomato", emoji: "🍅" },
    CropProfile { id: "potato", name: "Potato", emoji: "🥔" },
    CropProfile { id: "onion", name: "Onion", emoji: "🧅" },
    CropProfile { id: "sugarcane", name: "Sugarcane", emoji: "🎋" },
    CropProfile { id: "soybean", name: "Soybean", emoji: "🫘" },
    CropProfile { id: "groundnut", name: "Groundnut", emoji: "🥜" },
    CropProfile { id: "chilli", name: "Chilli", emoji: "🌶️" },
    CropProfile { id: "mustard", name: "Mustard", emoji: "🌿" },
    CropProfile { id: "banana", name: "Banana", emoji: "🍌" },
    CropProfile { id: "mango", name: "Mango", emoji: "🥭" },
    CropProfile { id: "grapes", name: "Grapes", emoji: "🍇" },
    CropProfile { id: "tea", name: "Tea", emoji: "🍃" },
];

/// Look up a crop by its catalog id
#[must_use]
pub fn crop_by_id(id: &str) -> Option<&'static CropProfile> {
    CROP_CATALOG.iter().find(|c| c.id == id)
}

/// Precaution severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No action required
    Info,
    /// Attention needed soon
    Warning,
    /// Immediate action required
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Danger => write!(f, "danger"),
        }
    }
}

/// One actionable precaution for the selected crop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropPrecaution {
    pub icon: &'static str,
    pub title: &'static str,
    pub detail: String,
    pub severity: Severity,
}

/// Boolean weather condition flags, derived once per precaution call
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionFlags {
    /// Rain band 51-82
    pub rainy: bool,
    /// Thunderstorm codes 95+
    pub storm: bool,
    /// Temperature at or above 38°C
    pub hot: bool,
    /// Feels-like below 10°C
    pub cold: bool,
    /// Wind above 25 km/h
    pub windy: bool,
    /// Humidity above 80%
    pub humid: bool,
    /// 3-day max precipitation under 1mm and humidity under 40%
    pub dry: bool,
}

impl ConditionFlags {
    /// Derive all flags from a snapshot
    #[must_use]
    pub fn derive(snapshot: &WeatherSnapshot) -> Self {
        let current = &snapshot.current;
        let max_precip = snapshot.three_day_max_precipitation();
        Self {
            rainy: code::is_rain(current.weather_code),
            storm: code::is_storm(current.weather_code),
            hot: current.temperature >= 38.0,
            cold: current.feels_like < 10.0,
            windy: current.wind_speed > 25.0,
            humid: current.humidity > 80.0,
            dry: max_precip < 1.0 && current.humidity < 40.0,
        }
    }
}

/// One row in a crop's precaution table
struct PrecautionRule {
    applies: fn(&ConditionFlags, &CurrentConditions) -> bool,
    icon: &'static str,
    severity: Severity,
    title: &'static str,
    detail: &'static str,
}

static WHEAT_RULES: &[PrecautionRule] = &[
    PrecautionRule {
        applies: |f, _| f.rainy || f.storm,
        icon: "🌧️",
        severity: Severity::Warning,
        title: "Avoid Harvesting in Rain",
        detail: "Wet wheat is prone to grain spoilage and fungal infection. Wait for 2–3 dry days before cutting.",
    },
    PrecautionRule {
        applies: |f, _| f.hot,
        icon: "🌡️",
        severity: Severity::Danger,
        title: "Heat Stress – Urgent Irrigation",
        detail: "Temps above 38°C during grain fill causes shrivelling. Irrigate immediately, preferably at dawn.",
    },
    PrecautionRule {
        applies: |f, _| f.cold,
        icon: "❄️",
        severity: Severity::Warning,
        title: "Frost Risk on Seedlings",
        detail: "Light frost can damage young wheat seedlings. Use sprinkler irrigation at night to prevent frost damage.",
    },
    PrecautionRule {
        applies: |f, _| f.dry,
        icon: "💧",
        severity: Severity::Warning,
        title: "Soil Moisture Low",
        detail: "Apply protective irrigation (4–5 cm). Crown root initiation stage is the most critical for water.",
    },
    PrecautionRule {
        applies: |f, _| f.humid,
        icon: "🍄",
        severity: Severity::Warning,
        title: "Yellow/Brown Rust Alert",
        detail: "High humidity favours rust diseases. Apply Propiconazole 25 EC @ 0.1% at first sign of spots.",
    },
];

static RICE_RULES: &[PrecautionRule] = &[
    PrecautionRule {
        applies: |f, _| f.windy,
        icon: "💨",
        severity: Severity::Warning,
        title: "Lodging Risk",
        detail: "Strong winds can flatten paddy at grain filling stage. Drain field slightly to stiffen stems.",
    },
    PrecautionRule {
        applies: |f, _| f.storm || f.rainy,
        icon: "🌊",
        severity: Severity::Danger,
        title: "Check Field Bunds",
        detail: "Heavy rain may breach bunds and cause flooding. Inspect and reinforce bunds; open drainage channels.",
    },
    PrecautionRule {
        applies: |f, _| f.humid,
        icon: "🍄",
        severity: Severity::Danger,
        title: "Blast Disease Alert",
        detail: "Humidity >80% is ideal for rice blast. Spray Tricyclazole 75 WP @ 0.6 g/L water preventively.",
    },
    PrecautionRule {
        applies: |f, _| f.hot,
        icon: "🌡️",
        severity: Severity::Warning,
        title: "Spikelet Sterility Risk",
        detail: "Temps >35°C at flowering reduce grain set. Maintain standing water to cool crop.",
    },
    PrecautionRule {
        applies: |f, _| f.dry,
        icon: "💧",
        severity: Severity::Warning,
        title: "Maintain Flood Water",
        detail: "Rice needs 5 cm standing water. Irrigate immediately; do not let soil crack.",
    },
];

static COTTON_RULES: &[PrecautionRule] = &[
    PrecautionRule {
        applies: |f, _| f.rainy || f.storm,
        icon: "🌧️",
        severity: Severity::Danger,
        title: "Protect Open Bolls",
        detail: "Rain on open bolls causes fibre staining and rotting. Harvest any mature open bolls urgently before more rain.",
    },
    PrecautionRule {
        applies: |f, _| f.humid,
        icon: "🍄",
        severity: Severity::Warning,
        title: "Boll Rot Risk",
        detail: "High humidity increases boll rot. Ensure proper plant spacing and spray Copper Oxychloride 50 WP @ 3 g/L.",
    },
    PrecautionRule {
        applies: |f, _| f.hot,
        icon: "🌡️",
        severity: Severity::Warning,
        title: "Increase Irrigation Frequency",
        detail: "Cotton is drought-sensitive at flowering. Irrigate every 7–10 days and apply mulch to conserve soil moisture.",
    },
    PrecautionRule {
        applies: |f, _| f.windy,
        icon: "💨",
        severity: Severity::Info,
        title: "Delay Pesticide Spray",
        detail: "Winds above 25 km/h cause spray drift onto neighbouring crops. Spray only in early morning calm.",
    },
    PrecautionRule {
        applies: |f, _| f.dry,
        icon: "💧",
        severity: Severity::Warning,
        title: "Critical Irrigation Period",
        detail: "Flowering & boll development needs consistent moisture. Deficit irrigation now reduces yield significantly.",
    },
];

static MAIZE_RULES: &[PrecautionRule] = &[
    PrecautionRule {
        applies: |f, _| f.windy,
        icon: "💨",
        severity: Severity::Warning,
        title: "Stalk Lodging Alert",
        detail: "Winds can topple maize at tasselling stage. Avoid top-dressing urea in windy conditions; stake if needed.",
    },
    PrecautionRule {
        applies: |f, _| f.rainy,
        icon: "🌧️",
        severity: Severity::Info,
        title: "Waterlogging Caution",
        detail: "Maize cannot tolerate waterlogging for more than 48 hours. Clear drainage channels immediately after rain.",
    },
    PrecautionRule {
        applies: |f, _| f.humid,
        icon: "🍄",
        severity: Severity::Warning,
        title: "Downy Mildew / Blight Risk",
        detail: "High humidity promotes downy mildew. Spray Metalaxyl MZ 72 WP @ 2.5 g/L at first sign.",
    },
    PrecautionRule {
        applies: |f, _| f.hot,
        icon: "🌡️",
        severity: Severity::Warning,
        title: "Silk Drying Risk",
        detail: "Heat >38°C desiccates silks and reduces pollination. Irrigation at silking is critical.",
    },
    PrecautionRule {
        applies: |f, _| f.dry,
        icon: "💧",
        severity: Severity::Danger,
        title: "Irrigate at Silking",
        detail: "Silking and grain fill are the most drought-sensitive stages. Even one missed irrigation can cut yield by 30%.",
    },
];

static TOMATO_RULES: &[PrecautionRule] = &[
    PrecautionRule {
        applies: |f, _| f.humid || f.rainy,
        icon: "🍄",
        severity: Severity::Danger,
        title: "Late Blight Alert",
        detail: "Humid/rainy weather is prime for Phytophthora blight. Spray Mancozeb 75 WP @ 2.5 g/L every 5–7 days.",
    },
    PrecautionRule {
        applies: |f, _| f.hot,
        icon: "🌡️",
        severity: Severity::Warning,
        title: "Blossom Drop Warning",
        detail: "Temps >35°C cause flower drop. Spray Planofix (NAA) @ 4.5 mg/L and irrigate in the evening.",
    },
    PrecautionRule {
        applies: |_, c| c.uv_index >= 7.0,
        icon: "☀️",
        severity: Severity::Info,
        title: "Use Shade Net (30–50%)",
        detail: "Intense sunlight causes sunscald on fruits. Use shade nets and harvest fruits before they are over-ripe.",
    },
    PrecautionRule {
        applies: |f, _| f.windy,
        icon: "💨",
        severity: Severity::Info,
        title: "Stake & Tie Plants",
        detail: "High winds can snap staked tomato plants. Check all ties and add extra stakes to tall varieties.",
    },
    PrecautionRule {
        applies: |f, _| f.dry,
        icon: "💧",
        severity: Severity::Warning,
        title: "Prevent Blossom End Rot",
        detail: "Irregular watering leads to calcium deficiency and blossom end rot. Drip irrigate consistently.",
    },
];

static POTATO_RULES: &[PrecautionRule] = &[
    PrecautionRule {
        applies: |f, _| f.humid || f.rainy,
        icon: "🍄",
        severity: Severity::Danger,
        title: "Late Blight Emergency",
        detail: "This weather is ideal for Phytophthora infestans. Spray Cymoxanil + Mancozeb @ 3 g/L every 5 days.",
    },
    PrecautionRule {
        applies: |f, _| f.cold,
        icon: "❄️",
        severity: Severity::Warning,
        title: "Frost Protection Needed",
        detail: "Ground frost will kill potato foliage. Apply light irrigation before sunset to create frost-protective water film.",
    },
    PrecautionRule {
        applies: |f, _| f.hot,
        icon: "🌡️",
        severity: Severity::Warning,
        title: "Tuber Greening Risk",
        detail: "Heat causes tubers to rise near surface. Earth up rows and add mulch to prevent sun exposure.",
    },
    PrecautionRule {
        applies: |f, _| f.dry,
        icon: "💧",
        severity: Severity::Warning,
        title: "Tuber Initiation Irrigation",
        detail: "Potato needs consistent moisture at tuber initiation. Irrigate every 10–12 days; avoid water stress.",
    },
];

static ONION_RULES: &[PrecautionRule] = &[
    PrecautionRule {
        applies: |f, _| f.rainy || f.storm,
        icon: "🌧️",
        severity: Severity::Warning,
        title: "Thrips & Purple Blotch Alert",
        detail: "Rain splashes spores of purple blotch. Spray Iprodione + Carbendazim @ 2 g/L after rain subsides.",
    },
    PrecautionRule {
        applies: |f, _| f.humid,
        icon: "🍄",
        severity: Severity::Warning,
        title: "Downy Mildew Watch",
        detail: "Humidity >80% favours downy mildew on leaves. Spray Metalaxyl MZ 72 WP @ 2.5 g/L preventively.",
    },
    PrecautionRule {
        applies: |f, _| f.dry,
        icon: "💧",
        severity: Severity::Info,
        title: "Bulb Development Irrigation",
        detail: "Onion needs steady moisture for bulb sizing. Irrigate every 7–8 days; stop 10 days before harvest.",
    },
    PrecautionRule {
        applies: |f, _| f.hot,
        icon: "🌡️",
        severity: Severity::Info,
        title: "Early Maturity Possible",
        detail: "High heat accelerates maturity. Monitor neck fall (tops bending over) and plan harvest 2–3 weeks early.",
    },
];

static SUGARCANE_RULES: &[PrecautionRule] = &[
    PrecautionRule {
        applies: |f, _| f.windy,
        icon: "💨",
        severity: Severity::Danger,
        title: "Lodging – Prop Up Canes",
        detail: "High winds topple sugarcane. Immediately bind and prop fallen canes with bamboo stakes to prevent yield loss.",
    },
    PrecautionRule {
        applies: |f, _| f.rainy || f.storm,
        icon: "🌧️",
        severity: Severity::Warning,
        title: "Red Rot Watch",
        detail: "Waterlogged soils spread red rot fungus. Open furrows for drainage; destroy affected stools.",
    },
    PrecautionRule {
        applies: |f, _| f.dry,
        icon: "💧",
        severity: Severity::Warning,
        title: "Irrigation Critical at Grand Growth",
        detail: "Sugarcane needs water every 10–15 days during grand growth stage. Deficit now hits juice brix heavily.",
    },
    PrecautionRule {
        applies: |f, _| f.humid,
        icon: "🍄",
        severity: Severity::Info,
        title: "Smut Disease Check",
        detail: "Inspect regularly for whip smut (black whip-like growth). Remove and burn infected stools.",
    },
];

static SOYBEAN_RULES: &[PrecautionRule] = &[
    PrecautionRule {
        applies: |f, _| f.rainy || f.humid,
        icon: "🍄",
        severity: Severity::Warning,
        title: "Rust & Stem Fly Alert",
        detail: "Humid weather promotes soybean rust. Spray Hexaconazole 5 EC @ 1 mL/L; monitor for stem fly damage.",
    },
    PrecautionRule {
        applies: |f, _| f.windy || f.storm,
        icon: "💨",
        severity: Severity::Info,
        title: "Delay Spraying",
        detail: "Soybean plants are delicate. Avoid foliar sprays in windy conditions to prevent crop damage and drift.",
    },
    PrecautionRule {
        applies: |f, _| f.hot,
        icon: "🌡️",
        severity: Severity::Warning,
        title: "Pod Fill Irrigation",
        detail: "Heat stress at R5–R6 stage reduces seed size. Ensure moisture availability; apply light irrigation.",
    },
    PrecautionRule {
        applies: |f, _| f.dry,
        icon: "💧",
        severity: Severity::Warning,
        title: "Critical Pod-Fill Stage",
        detail: "Drought during pod fill reduces protein content and yield. Irrigate if soil is dry 5 cm below surface.",
    },
];

static GROUNDNUT_RULES: &[PrecautionRule] = &[
    PrecautionRule {
        applies: |f, _| f.dry,
        icon: "💧",
        severity: Severity::Danger,
        title: "Irrigate at Peg & Pod Fill",
        detail: "Drought at pegging causes complete pod failure. Immediately irrigate; even one drought event cuts yield by 40%.",
    },
    PrecautionRule {
        applies: |f, _| f.rainy || f.humid,
        icon: "🍄",
        severity: Severity::Warning,
        title: "Tikka Disease / Collar Rot Alert",
        detail: "Wet weather promotes Cercospora tikka and collar rot. Apply Chlorothalonil 75 WP @ 2 g/L.",
    },
    PrecautionRule {
        applies: |f, _| f.hot,
        icon: "🌡️",
        severity: Severity::Info,
        title: "Mulch to Conserve Moisture",
        detail: "Spread paddy straw mulch between rows to reduce soil temp and conserve moisture for pod development.",
    },
    PrecautionRule {
        applies: |f, _| f.cold,
        icon: "❄️",
        severity: Severity::Info,
        title: "Delayed Maturity Possible",
        detail: "Cold weather slows pod maturation. Check maturity by sampling; harvest only when shell inner wall is dark.",
    },
];

static CHILLI_RULES: &[PrecautionRule] = &[
    PrecautionRule {
        applies: |f, _| f.humid || f.rainy,
        icon: "🍄",
        severity: Severity::Danger,
        title: "Anthracnose (Die-Back) Alert",
        detail: "Wet weather causes fruit rot and die-back. Spray Carbendazim 50 WP @ 1 g/L at weekly intervals.",
    },
    PrecautionRule {
        applies: |f, _| f.hot,
        icon: "🌡️",
        severity: Severity::Warning,
        title: "Flower Drop in Heat",
        detail: "Temps >35°C cause flower and fruit drop. Spray Boron @ 0.2% and irrigate in the evening.",
    },
    PrecautionRule {
        applies: |f, _| f.cold,
        icon: "❄️",
        severity: Severity::Warning,
        title: "Frost Damage Risk",
        detail: "Chilli is frost-sensitive. Cover with polythene overnight; apply sulphur dust to reduce frost impact.",
    },
    PrecautionRule {
        applies: |f, _| f.windy,
        icon: "💨",
        severity: Severity::Info,
        title: "Support Tall Plants",
        detail: "Wind can snap gangly chilli plants. Stake plants to bamboo poles and tie loosely.",
    },
];

static MUSTARD_RULES: &[PrecautionRule] = &[
    PrecautionRule {
        applies: |f, _| f.cold,
        icon: "❄️",
        severity: Severity::Info,
        title: "Good Conditions for Flowering",
        detail: "Cool temperatures (10–20°C) are ideal for mustard flowering and pod set. No immediate action needed.",
    },
    PrecautionRule {
        applies: |f, _| f.humid || f.rainy,
        icon: "🍄",
        severity: Severity::Danger,
        title: "Alternaria Blight / Powdery Mildew",
        detail: "Wet conditions trigger alternaria blight and white rust. Spray Mancozeb 75 WP @ 2 g/L immediately.",
    },
    PrecautionRule {
        applies: |f, _| f.hot,
        icon: "🌡️",
        severity: Severity::Danger,
        title: "Silique Shrivelling Risk",
        detail: "Heat during seed fill shrivels mustard pods. Irrigate if possible; advance harvest by 4–5 days.",
    },
    PrecautionRule {
        applies: |f, _| f.windy,
        icon: "💨",
        severity: Severity::Info,
        title: "Lodging Possible at Maturity",
        detail: "Tall mustard plants can lodge in wind before harvest. Plan combining or cutting within a few days.",
    },
];

static BANANA_RULES: &[PrecautionRule] = &[
    PrecautionRule {
        applies: |f, _| f.windy,
        icon: "💨",
        severity: Severity::Danger,
        title: "Stake Plants Immediately",
        detail: "Banana pseudostems snap in winds above 25 km/h. Prop each plant with bamboo stakes tied at an angle.",
    },
    PrecautionRule {
        applies: |f, _| f.cold,
        icon: "❄️",
        severity: Severity::Danger,
        title: "Cover Young Suckers",
        detail: "Temps below 10°C cause chilling injury. Cover young suckers with polythene or straw; delay bunch emergence plants.",
    },
    PrecautionRule {
        applies: |f, _| f.humid || f.rainy,
        icon: "🍄",
        severity: Severity::Warning,
        title: "Sigatoka Leaf Spot Alert",
        detail: "Rain and humidity spread Sigatoka disease. Spray Propiconazole 25 EC @ 1 mL/L on leaf undersides.",
    },
    PrecautionRule {
        applies: |f, _| f.hot,
        icon: "🌡️",
        severity: Severity::Info,
        title: "Increase Irrigation",
        detail: "Banana is high water-use. In heat, irrigate every 3–4 days; mulch heavily around the base.",
    },
];

static MANGO_RULES: &[PrecautionRule] = &[
    PrecautionRule {
        applies: |f, _| f.cold,
        icon: "❄️",
        severity: Severity::Warning,
        title: "Protect Flowering Shoots",
        detail: "Cold winds and frost damage mango panicles. Spray potassium nitrate @ 1% to delay and protect flowering.",
    },
    PrecautionRule {
        applies: |f, _| f.rainy || f.humid,
        icon: "🍄",
        severity: Severity::Danger,
        title: "Powdery Mildew & Anthracnose",
        detail: "Pre-harvest rains cause anthracnose fruit rot. Spray Carbendazim 50 WP @ 1 g/L during panicle development.",
    },
    PrecautionRule {
        applies: |f, c| f.hot && c.uv_index >= 7.0,
        icon: "☀️",
        severity: Severity::Warning,
        title: "Sunburn on Fruits",
        detail: "Intense sun causes yellow patching on fruits. Apply whitewash (lime) to tree trunks and cover exposed clusters.",
    },
    PrecautionRule {
        applies: |f, _| f.windy,
        icon: "💨",
        severity: Severity::Warning,
        title: "Pre-Mature Fruit Drop",
        detail: "Strong winds cause premature fruit drop. Spray NAA @ 20 ppm to improve fruit retention.",
    },
];

static GRAPES_RULES: &[PrecautionRule] = &[
    PrecautionRule {
        applies: |f, _| f.humid || f.rainy,
        icon: "🍄",
        severity: Severity::Danger,
        title: "Downy & Powdery Mildew Emergency",
        detail: "Grapes are extremely susceptible. Spray Fosetyl Aluminium @ 2.5 g/L for downy; Sulfur 80 WP @ 3 g/L for powdery mildew.",
    },
    PrecautionRule {
        applies: |f, _| f.rainy,
        icon: "🌧️",
        severity: Severity::Warning,
        title: "Berry Cracking at Harvest",
        detail: "Rain just before harvest causes berry splitting and botrytis rot. Harvest ripe clusters immediately if possible.",
    },
    PrecautionRule {
        applies: |f, _| f.hot,
        icon: "🌡️",
        severity: Severity::Warning,
        title: "Berry Shrivelling",
        detail: "Heat causes loss of berry plumpness and sugar concentration. Irrigate and apply kaolin spray to reduce surface temp.",
    },
    PrecautionRule {
        applies: |f, _| f.windy,
        icon: "💨",
        severity: Severity::Info,
        title: "Check Trellis & Wires",
        detail: "High winds can dislodge canes from trellis wires. Inspect and re-tie all cordons and canes.",
    },
];

static TEA_RULES: &[PrecautionRule] = &[
    PrecautionRule {
        applies: |f, _| f.humid || f.rainy,
        icon: "🍄",
        severity: Severity::Warning,
        title: "Blister Blight Alert",
        detail: "Humid rains promote blister blight on young shoots. Spray Hexaconazole 5 EC @ 0.5 mL/L at 7-day intervals.",
    },
    PrecautionRule {
        applies: |_, c| c.uv_index >= 7.0,
        icon: "☀️",
        severity: Severity::Info,
        title: "Optimal Plucking Window",
        detail: "High UV promotes anthocyanin in leaves. Pluck in early morning (before 10 AM) for best quality flush.",
    },
    PrecautionRule {
        applies: |f, _| f.cold,
        icon: "❄️",
        severity: Severity::Warning,
        title: "Frost Burns Young Shoots",
        detail: "Night frost damages tender tea shoots in highland gardens. Light overhead irrigation before dawn helps prevent frost.",
    },
    PrecautionRule {
        applies: |f, _| f.dry,
        icon: "💧",
        severity: Severity::Warning,
        title: "Drought Reduces Flush Yield",
        detail: "Dry spells significantly reduce new growth. Irrigate if possible; apply mulch to conserve soil moisture in rows.",
    },
];

/// Rule table for a crop id; unknown ids get an empty table and fall
/// through to the favourable-conditions fallback
fn rules_for(crop_id: &str) -> &'static [PrecautionRule] {
    match crop_id {
        "wheat" => WHEAT_RULES,
        "rice" => RICE_RULES,
        "cotton" => COTTON_RULES,
        "maize" => MAIZE_RULES,
        "tomato" => TOMATO_RULES,
        "potato" => POTATO_RULES,
        "onion" => ONION_RULES,
        "sugarcane" => SUGARCANE_RULES,
        "soybean" => SOYBEAN_RULES,
        "groundnut" => GROUNDNUT_RULES,
        "chilli" => CHILLI_RULES,
        "mustard" => MUSTARD_RULES,
        "banana" => BANANA_RULES,
        "mango" => MANGO_RULES,
        "grapes" => GRAPES_RULES,
        "tea" => TEA_RULES,
        _ => &[],
    }
}

/// Generate all applicable precautions for a crop under this snapshot
///
/// The universal storm rule fires first regardless of crop; every matching
/// table row fires after it. When nothing matches at all, a single
/// info-severity favourable fallback names the crop.
#[must_use]
pub fn crop_precautions(crop_id: &str, snapshot: &WeatherSnapshot) -> Vec<CropPrecaution> {
    let flags = ConditionFlags::derive(snapshot);
    let mut precautions = Vec::new();

    if flags.storm {
        precautions.push(CropPrecaution {
            icon: "⚡",
            severity: Severity::Danger,
            title: "Thunderstorm – Stop All Field Work",
            detail: "Do not operate machinery or stand near tall trees. Secure irrigation pipes and tools immediately."
                .to_string(),
        });
    }

    for rule in rules_for(crop_id) {
        if (rule.applies)(&flags, &snapshot.current) {
            precautions.push(CropPrecaution {
                icon: rule.icon,
                severity: rule.severity,
                title: rule.title,
                detail: rule.detail.to_string(),
            });
        }
    }

    if precautions.is_empty() {
        let crop_name = crop_by_id(crop_id).map_or(crop_id, |c| c.name);
        precautions.push(CropPrecaution {
            icon: "✅",
            severity: Severity::Info,
            title: "Conditions Look Favourable",
            detail: format!(
                "Current weather poses no immediate risk to your {crop_name} crop. Continue normal farm operations."
            ),
        });
    }

    precautions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrentConditions, DailySample, Location, WeatherSnapshot};
    use chrono::{NaiveDate, Utc};
    use rstest::rstest;

    fn create_test_snapshot() -> WeatherSnapshot {
        let base = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let daily = (0..3i64)
            .map(|i| {
                let date = base + chrono::Duration::days(i);
                DailySample {
                    date,
                    temp_max: 24.0,
                    temp_min: 14.0,
                    weather_code: 1,
                    precipitation_sum: 2.0,
                    wind_max: 12.0,
                    uv_index_max: 5.0,
                    sunrise: date.and_hms_opt(7, 0, 0).unwrap(),
                    sunset: date.and_hms_opt(17, 45, 0).unwrap(),
                }
            })
            .collect();

        WeatherSnapshot {
            location: Location::new(28.6139, 77.209, "New Delhi".to_string()),
            current: CurrentConditions {
                temperature: 20.0,
                feels_like: 20.0,
                humidity: 55.0,
                wind_speed: 10.0,
                wind_direction: 315,
                visibility: 10.0,
                weather_code: 1,
                is_day: true,
                uv_index: 5.0,
                precipitation: 0.0,
                dew_point: 11.0,
            },
            hourly: vec![],
            daily,
            retrieved_at: Utc::now(),
        }
    }

    #[test]
    fn test_catalog_has_sixteen_unique_ids() {
        assert_eq!(CROP_CATALOG.len(), 16);
        for (i, a) in CROP_CATALOG.iter().enumerate() {
            for b in &CROP_CATALOG[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
        assert_eq!(crop_by_id("wheat").unwrap().name, "Wheat");
        assert!(crop_by_id("kale").is_none());
    }

    #[test]
    fn test_benign_weather_yields_single_favourable_fallback() {
        let snapshot = create_test_snapshot();
        for crop in &CROP_CATALOG {
            let precautions = crop_precautions(crop.id, &snapshot);
            assert_eq!(precautions.len(), 1, "crop {}", crop.id);
            assert_eq!(precautions[0].severity, Severity::Info);
            assert_eq!(precautions[0].title, "Conditions Look Favourable");
            assert!(precautions[0].detail.contains(crop.name));
        }
    }

    #[test]
    fn test_unknown_crop_falls_through_to_fallback() {
        let snapshot = create_test_snapshot();
        let precautions = crop_precautions("quinoa", &snapshot);
        assert_eq!(precautions.len(), 1);
        assert_eq!(precautions[0].severity, Severity::Info);
        assert!(precautions[0].detail.contains("quinoa"));
    }

    #[test]
    fn test_storm_rule_fires_first_for_every_crop() {
        let mut snapshot = create_test_snapshot();
        snapshot.current.weather_code = 95;
        for crop in &CROP_CATALOG {
            let precautions = crop_precautions(crop.id, &snapshot);
            assert_eq!(precautions[0].title, "Thunderstorm – Stop All Field Work");
            assert_eq!(precautions[0].severity, Severity::Danger);
        }
    }

    #[test]
    fn test_wheat_frost_rule() {
        let mut snapshot = create_test_snapshot();
        snapshot.current.feels_like = 5.0;
        let precautions = crop_precautions("wheat", &snapshot);
        assert_eq!(precautions.len(), 1);
        assert_eq!(precautions[0].title, "Frost Risk on Seedlings");
        assert_eq!(precautions[0].severity, Severity::Warning);
    }

    #[test]
    fn test_all_matching_rules_fire() {
        // Cold AND dry at once: wheat emits both the frost and soil moisture rules
        let mut snapshot = create_test_snapshot();
        snapshot.current.feels_like = 5.0;
        snapshot.current.humidity = 30.0;
        for day in &mut snapshot.daily {
            day.precipitation_sum = 0.0;
        }
        let titles: Vec<&str> = crop_precautions("wheat", &snapshot)
            .iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Frost Risk on Seedlings", "Soil Moisture Low"]);
    }

    #[test]
    fn test_mustard_welcomes_cold() {
        let mut snapshot = create_test_snapshot();
        snapshot.current.feels_like = 8.0;
        let precautions = crop_precautions("mustard", &snapshot);
        assert_eq!(precautions.len(), 1);
        assert_eq!(precautions[0].title, "Good Conditions for Flowering");
        assert_eq!(precautions[0].severity, Severity::Info);
    }

    #[test]
    fn test_mango_sunburn_needs_heat_and_uv_together() {
        let mut snapshot = create_test_snapshot();
        snapshot.current.temperature = 40.0;
        snapshot.current.uv_index = 5.0;
        let titles: Vec<&str> = crop_precautions("mango", &snapshot)
            .iter()
            .map(|p| p.title)
            .collect();
        assert!(!titles.contains(&"Sunburn on Fruits"));

        snapshot.current.uv_index = 8.0;
        let titles: Vec<&str> = crop_precautions("mango", &snapshot)
            .iter()
            .map(|p| p.title)
            .collect();
        assert!(titles.contains(&"Sunburn on Fruits"));
    }

    #[rstest]
    #[case("rice", "Blast Disease Alert", Severity::Danger)]
    #[case("potato", "Late Blight Emergency", Severity::Danger)]
    #[case("grapes", "Downy & Powdery Mildew Emergency", Severity::Danger)]
    #[case("tea", "Blister Blight Alert", Severity::Warning)]
    fn test_humidity_rules(#[case] crop: &str, #[case] title: &str, #[case] severity: Severity) {
        let mut snapshot = create_test_snapshot();
        snapshot.current.humidity = 90.0;
        let precautions = crop_precautions(crop, &snapshot);
        let hit = precautions
            .iter()
            .find(|p| p.title == title)
            .unwrap_or_else(|| panic!("{crop} missing '{title}'"));
        assert_eq!(hit.severity, severity);
    }

    #[test]
    fn test_banana_wind_danger() {
        let mut snapshot = create_test_snapshot();
        snapshot.current.wind_speed = 30.0;
        let precautions = crop_precautions("banana", &snapshot);
        assert_eq!(precautions[0].title, "Stake Plants Immediately");
        assert_eq!(precautions[0].severity, Severity::Danger);
    }
}
