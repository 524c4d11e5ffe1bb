//! Fixed catalogs offered by the intake form and the admin dashboard.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sentinel dial-code value that reveals the free-text country code field.
pub const OTHER_COUNTRY_CODE: &str = "other";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialCode {
    pub code: &'static str,
    pub region: &'static str,
    pub label: &'static str,
}

pub const DIAL_CODES: &[DialCode] = &[
    DialCode { code: "+1 (246)", region: "BB", label: "+1 (246) (Barbados)" },
    DialCode { code: "+1", region: "US", label: "+1 (US/Canada)" },
    DialCode { code: "+44", region: "GB", label: "+44 (UK)" },
    DialCode { code: "+91", region: "IN", label: "+91 (India)" },
    DialCode { code: "+86", region: "CN", label: "+86 (China)" },
    DialCode { code: "+81", region: "JP", label: "+81 (Japan)" },
    DialCode { code: "+49", region: "DE", label: "+49 (Germany)" },
    DialCode { code: "+33", region: "FR", label: "+33 (France)" },
    DialCode { code: "+61", region: "AU", label: "+61 (Australia)" },
    DialCode { code: "+55", region: "BR", label: "+55 (Brazil)" },
];

pub fn find_dial_code(code: &str) -> Option<&'static DialCode> {
    DIAL_CODES.iter().find(|d| d.code == code)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum ShopCategory {
    #[serde(rename = "video_games")]
    VideoGames,
}

impl ShopCategory {
    pub const ALL: [ShopCategory; 1] = [ShopCategory::VideoGames];

    pub fn id(self) -> &'static str {
        match self {
            ShopCategory::VideoGames => "video_games",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShopCategory::VideoGames => "Video Games",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

/// Current-generation systems. `Retro` unlocks the retro catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum Console {
    #[serde(rename = "xboxone")]
    XboxOne,
    #[serde(rename = "xbox360")]
    Xbox360,
    #[serde(rename = "ps4")]
    Ps4,
    #[serde(rename = "ps5")]
    Ps5,
    #[serde(rename = "nintendoswitch")]
    NintendoSwitch,
    #[serde(rename = "nintendoswitch2")]
    NintendoSwitch2,
    #[serde(rename = "pc")]
    Pc,
    #[serde(rename = "retro")]
    Retro,
}

impl Console {
    pub const ALL: [Console; 8] = [
        Console::XboxOne,
        Console::Xbox360,
        Console::Ps4,
        Console::Ps5,
        Console::NintendoSwitch,
        Console::NintendoSwitch2,
        Console::Pc,
        Console::Retro,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Console::XboxOne => "xboxone",
            Console::Xbox360 => "xbox360",
            Console::Ps4 => "ps4",
            Console::Ps5 => "ps5",
            Console::NintendoSwitch => "nintendoswitch",
            Console::NintendoSwitch2 => "nintendoswitch2",
            Console::Pc => "pc",
            Console::Retro => "retro",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Console::XboxOne => "Xbox One",
            Console::Xbox360 => "Xbox 360",
            Console::Ps4 => "PlayStation 4",
            Console::Ps5 => "PlayStation 5",
            Console::NintendoSwitch => "Nintendo Switch",
            Console::NintendoSwitch2 => "Nintendo Switch 2",
            Console::Pc => "PC",
            Console::Retro => "Retro",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum RetroConsole {
    #[serde(rename = "ps1")]
    Ps1,
    #[serde(rename = "ps2")]
    Ps2,
    #[serde(rename = "xbox")]
    Xbox,
    #[serde(rename = "psp")]
    Psp,
    #[serde(rename = "nintendo64-snes")]
    Nintendo64Snes,
    #[serde(rename = "nintendo3ds-ds-wii")]
    Nintendo3dsDsWii,
}

impl RetroConsole {
    pub const ALL: [RetroConsole; 6] = [
        RetroConsole::Ps1,
        RetroConsole::Ps2,
        RetroConsole::Xbox,
        RetroConsole::Psp,
        RetroConsole::Nintendo64Snes,
        RetroConsole::Nintendo3dsDsWii,
    ];

    pub fn id(self) -> &'static str {
        match self {
            RetroConsole::Ps1 => "ps1",
            RetroConsole::Ps2 => "ps2",
            RetroConsole::Xbox => "xbox",
            RetroConsole::Psp => "psp",
            RetroConsole::Nintendo64Snes => "nintendo64-snes",
            RetroConsole::Nintendo3dsDsWii => "nintendo3ds-ds-wii",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RetroConsole::Ps1 => "PS1",
            RetroConsole::Ps2 => "PS2",
            RetroConsole::Xbox => "Xbox",
            RetroConsole::Psp => "PSP",
            RetroConsole::Nintendo64Snes => "Nintendo 64/SNES",
            RetroConsole::Nintendo3dsDsWii => "Nintendo 3DS/DS/WII",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

/// True when `id` names an entry of either console catalog.
pub fn is_known_console(id: &str) -> bool {
    Console::from_id(id).is_some() || RetroConsole::from_id(id).is_some()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrizeOption {
    pub prize_type: &'static str,
    pub value: &'static str,
    pub label: &'static str,
}

pub const PRIZE_CATALOG: &[PrizeOption] = &[
    PrizeOption { prize_type: "voucher", value: "$10 voucher", label: "$10 Voucher" },
    PrizeOption { prize_type: "voucher", value: "$5 voucher", label: "$5 Voucher" },
    PrizeOption { prize_type: "discount", value: "10% off", label: "10% Off" },
    PrizeOption { prize_type: "voucher", value: "$20 voucher", label: "$20 Voucher" },
];

pub fn find_prize(value: &str) -> Option<&'static PrizeOption> {
    PRIZE_CATALOG.iter().find(|p| p.value == value)
}

/// Value/label pair as rendered by selects and checkbox groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OptionItem {
    pub value: String,
    pub label: String,
}

impl OptionItem {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_ids_round_trip_through_serde() {
        for console in Console::ALL {
            let json = serde_json::to_string(&console).unwrap();
            assert_eq!(json, format!("\"{}\"", console.id()));
            assert_eq!(Console::from_id(console.id()), Some(console));
        }
        for retro in RetroConsole::ALL {
            let json = serde_json::to_string(&retro).unwrap();
            assert_eq!(json, format!("\"{}\"", retro.id()));
        }
    }

    #[test]
    fn test_known_console_covers_both_catalogs() {
        assert!(is_known_console("ps5"));
        assert!(is_known_console("nintendo64-snes"));
        assert!(!is_known_console("dreamcast"));
    }

    #[test]
    fn test_prize_lookup() {
        let prize = find_prize("10% off").unwrap();
        assert_eq!(prize.prize_type, "discount");
        assert!(find_prize("$100 voucher").is_none());
    }

    #[test]
    fn test_dial_codes_include_home_region() {
        assert_eq!(find_dial_code("+1 (246)").map(|d| d.region), Some("BB"));
        assert!(find_dial_code(OTHER_COUNTRY_CODE).is_none());
    }
}
