//! 风格包节点

use crate::styler::prompt_styler::prompt_styler_nodes;

prompt_styler_nodes! {
    SDXLPromptStylerAll => All,
    SDXLPromptStylerbyArtist => Artist,
    SDXLPromptStylerbyCamera => Camera,
    SDXLPromptbyCelticArt => CelticArt,
    SDXLPromptStylerbyComposition => Composition,
    SDXLPromptbyContemporaryNordicArt => ContemporaryNordicArt,
    SDXLPromptStylerbyCyberpunkSurrealism => CyberpunkSurrealism,
    SDXLPromptStylerbyDepth => Depth,
    SDXLPromptStylerbyEnvironment => Environment,
    SDXLPromptStylerbyFantasySetting => FantasySetting,
    SDXLPromptbyFashionArt => FashionArt,
    SDXLPromptStylerbyFilter => Filter,
    SDXLPromptStylerbyFocus => Focus,
    SDXLPromptbyGothicRevival => GothicRevival,
    SDXLPromptStylerHorror => Horror,
    SDXLPromptbyIcelandicContemporaryArt => IcelandicContemporaryArt,
    SDXLPromptStylerbyImpressionism => Impressionism,
    SDXLPromptbyIrishFolkArt => IrishFolkArt,
    SDXLPromptStylerbyLighting => Lighting,
    SDXLPromptStylerbyMileHigh => MileHigh,
    SDXLPromptStylerMisc => Misc,
    SDXLPromptStylerbyMood => Mood,
    SDXLPromptStylerbyMythicalCreature => MythicalCreature,
    SDXLPromptStylerbyOriginal => Original,
    SDXLPromptStylerbyQuantumRealism => QuantumRealism,
    SDXLPromptbyRomanticNationalismArt => RomanticNationalismArt,
    SDXLPromptbySportsArt => SportsArt,
    SDXLPromptStylerbySteamPunkRealism => SteamPunkRealism,
    SDXLPromptbyStreetArt => StreetArt,
    SDXLPromptStylerbySubject => Subject,
    SDXLPromptStylerbySurrealism => Surrealism,
    SDXLPromptStylerbyTheme => Theme,
    SDXLPromptStylerbyTimeofDay => TimeofDay,
    SDXLPromptbyVikingArt => VikingArt,
    SDXLPromptbyWildlifeArt => WildlifeArt,
    SDXLPromptStylerbyWyvern => Wyvern,
}
