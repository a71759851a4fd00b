// Film Watch Catalog constants

pub const DB_FILENAME: &str = "filmwatch.db";

// Values stamped onto parsed entries; callers may override the narrative.
pub const DEFAULT_VERIFICATION: &str = "Confirmed";
pub const DEFAULT_NARRATIVE: &str = "Watch worn in film.";

// Stats query
pub const TOP_BRANDS_LIMIT: i64 = 10;

// Articles that end up persisted as brand names when a watch phrase doesn't
// split the way the sentence shapes expect. fix_misassigned_brands repairs
// watches pointing at these.
pub const STOPWORD_BRANDS: [&str; 4] = ["a", "an", "A", "An"];

// Known watch manufacturers. Order is load-bearing: the parser scans this
// list front to back, so multi-word names must come before their substrings
// ("TAG Heuer" before "Heuer", "IWC Schaffhausen" before "IWC"). Do not sort.
pub const BRAND_LEXICON: [&str; 77] = [
    "Audemars Piguet",
    "Patek Philippe",
    "Vacheron Constantin",
    "Jaeger-LeCoultre",
    "A. Lange & Söhne",
    "Frederique Constant",
    "Ulysse Nardin",
    "Girard-Perregaux",
    "Glashutte Original",
    "Universal Genève",
    "Richard Mille",
    "Bell & Ross",
    "Maurice Lacroix",
    "Carl F. Bucherer",
    "Raymond Weil",
    "TAG Heuer",
    "IWC Schaffhausen",
    "Franck Muller",
    "Rolex",
    "Omega",
    "Heuer",
    "Hamilton",
    "Panerai",
    "Breitling",
    "IWC",
    "Cartier",
    "Zenith",
    "Breguet",
    "Longines",
    "Seiko",
    "Citizen",
    "Casio",
    "Timex",
    "Doxa",
    "Hublot",
    "Tudor",
    "Bulgari",
    "Chopard",
    "Oris",
    "Tissot",
    "Rado",
    "Mido",
    "Certina",
    "Swatch",
    "Luminox",
    "Fortis",
    "Glycine",
    "Stowa",
    "Nomos",
    "Junghans",
    "Sinn",
    "Hanhart",
    "Laco",
    "Damasko",
    "Ball",
    "Alpina",
    "Movado",
    "Ebel",
    "Concord",
    "Corum",
    "Parmigiani",
    "Piaget",
    "Blancpain",
    "Bremont",
    "Christopher Ward",
    "Squale",
    "Steinhart",
    "Halios",
    "Monta",
    "Farer",
    "Lorier",
    "G-Shock",
    "Victorinox",
    "Bulova",
    "Gruen",
    "Elgin",
    "Waltham",
];
