//! 风格包
//!
//! 每个风格包对应一个 JSON 目录文件和一个 ComfyUI 节点

use std::collections::HashMap;

use lazy_static::lazy_static;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::error::Error;

macro_rules! style_packs {
    ($($pack:ident => ($class:literal, $display:literal, $file:literal)),* $(,)?) => {
        /// 风格包
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
        pub enum StylePack {
            $($pack,)*
        }

        impl StylePack {
            /// 节点 class 名称
            pub fn class_name(&self) -> &'static str {
                match self {
                    $(StylePack::$pack => $class,)*
                }
            }

            /// 节点显示名称
            pub fn display_name(&self) -> &'static str {
                match self {
                    $(StylePack::$pack => $display,)*
                }
            }

            /// 目录文件名称
            pub fn file_name(&self) -> &'static str {
                match self {
                    $(StylePack::$pack => $file,)*
                }
            }

            /// 内置的目录文件内容
            pub fn bundled(&self) -> &'static str {
                match self {
                    $(StylePack::$pack => include_str!(concat!("../../resources/styles/", $file)),)*
                }
            }
        }
    };
}

style_packs! {
    All => ("SDXLPromptStylerAll", "Prompt Styler All", "sdxl_styles_all.json"),
    Artist => ("SDXLPromptStylerbyArtist", "Prompt Styler Artist", "sdxl_styles_artists.json"),
    Camera => ("SDXLPromptStylerbyCamera", "Prompt Styler Camera", "sdxl_styles_camera.json"),
    CelticArt => ("SDXLPromptbyCelticArt", "Prompt Styler Celtic Art", "sdxl_styles_celticart.json"),
    Composition => ("SDXLPromptStylerbyComposition", "Prompt Styler Composition", "sdxl_styles_composition.json"),
    ContemporaryNordicArt => ("SDXLPromptbyContemporaryNordicArt", "Prompt Styler Contemporary Nordic Art", "sdxl_styles_contempnordic.json"),
    CyberpunkSurrealism => ("SDXLPromptStylerbyCyberpunkSurrealism", "Prompt Styler Cyberpunk Surrealism", "sdxl_styles_cs.json"),
    Depth => ("SDXLPromptStylerbyDepth", "Prompt Styler Depth", "sdxl_styles_depth.json"),
    Environment => ("SDXLPromptStylerbyEnvironment", "Prompt Styler Environment", "sdxl_styles_environment.json"),
    FantasySetting => ("SDXLPromptStylerbyFantasySetting", "Prompt Styler Fantasy-Setting", "sdxl_styles_fs.json"),
    FashionArt => ("SDXLPromptbyFashionArt", "Prompt Styler Fashion", "sdxl_styles_fashion.json"),
    Filter => ("SDXLPromptStylerbyFilter", "Prompt Styler Filter", "sdxl_styles_filter.json"),
    Focus => ("SDXLPromptStylerbyFocus", "Prompt Styler Focus", "sdxl_styles_focus.json"),
    GothicRevival => ("SDXLPromptbyGothicRevival", "Prompt Styler Gothic Revival", "sdxl_styles_gothrev.json"),
    Horror => ("SDXLPromptStylerHorror", "Prompt Styler Horror", "sdxl_styles_horror.json"),
    IcelandicContemporaryArt => ("SDXLPromptbyIcelandicContemporaryArt", "Prompt Styler Icelandic Contemporary Art", "sdxl_styles_contempnordic.json"),
    Impressionism => ("SDXLPromptStylerbyImpressionism", "Prompt Styler Impressionism", "sdxl_styles_impressionism.json"),
    IrishFolkArt => ("SDXLPromptbyIrishFolkArt", "Prompt Styler Irish Folk Art", "sdxl_styles_irishfolkart.json"),
    Lighting => ("SDXLPromptStylerbyLighting", "Prompt Styler Lighting", "sdxl_styles_lighting.json"),
    MileHigh => ("SDXLPromptStylerbyMileHigh", "Prompt Styler MileHigh", "sdxl_styles_mh.json"),
    Misc => ("SDXLPromptStylerMisc", "Prompt Styler Misc", "sdxl_styles_misc.json"),
    Mood => ("SDXLPromptStylerbyMood", "Prompt Styler Mood", "sdxl_styles_mood.json"),
    MythicalCreature => ("SDXLPromptStylerbyMythicalCreature", "Prompt Styler Mythical Creature", "sdxl_styles_mc.json"),
    Original => ("SDXLPromptStylerbyOriginal", "Prompt Styler Original", "sdxl_styles_original.json"),
    QuantumRealism => ("SDXLPromptStylerbyQuantumRealism", "Prompt Styler Quantum Realism", "sdxl_styles_qr.json"),
    RomanticNationalismArt => ("SDXLPromptbyRomanticNationalismArt", "Prompt Styler Romantic Nationalism", "sdxl_styles_romanticnat.json"),
    SportsArt => ("SDXLPromptbySportsArt", "Prompt Styler Sports", "sdxl_styles_sports.json"),
    SteamPunkRealism => ("SDXLPromptStylerbySteamPunkRealism", "Prompt Styler SteamPunk Realism", "sdxl_styles_sr.json"),
    StreetArt => ("SDXLPromptbyStreetArt", "Prompt Styler Street", "sdxl_styles_street.json"),
    Subject => ("SDXLPromptStylerbySubject", "Prompt Styler Subject", "sdxl_styles_subject.json"),
    Surrealism => ("SDXLPromptStylerbySurrealism", "Prompt Styler Surrealism", "sdxl_styles_surrealism.json"),
    Theme => ("SDXLPromptStylerbyTheme", "Prompt Styler Theme", "sdxl_styles_themes.json"),
    TimeofDay => ("SDXLPromptStylerbyTimeofDay", "Prompt Styler Time of Day", "sdxl_styles_tod.json"),
    VikingArt => ("SDXLPromptbyVikingArt", "Prompt Styler Viking Art", "sdxl_styles_viking.json"),
    WildlifeArt => ("SDXLPromptbyWildlifeArt", "Prompt Styler Wildlife", "sdxl_styles_wildlife.json"),
    Wyvern => ("SDXLPromptStylerbyWyvern", "Prompt Styler Wyvern", "sdxl_styles_wyvern.json"),
}

lazy_static! {
    static ref PACKS_BY_CLASS_NAME: HashMap<&'static str, StylePack> = StylePack::iter()
        .map(|pack| (pack.class_name(), pack))
        .collect();
}

impl StylePack {
    /// 通过节点 class 名称查找风格包
    pub fn from_class_name(class_name: &str) -> Result<Self, Error> {
        PACKS_BY_CLASS_NAME
            .get(class_name)
            .copied()
            .ok_or_else(|| Error::UnknownStylePack(class_name.to_string()))
    }
}
