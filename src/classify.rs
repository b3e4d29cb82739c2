//! Product classification from names
//!
//! Maps a product name (usually an image filename stem) to a category,
//! subcategory, brand, and an estimated GHS price, and generates the
//! boilerplate that goes with them: SKUs, marketing descriptions, and
//! feature bullet lists.
//!
//! The keyword and brand tables are ordered slices checked top to bottom;
//! the first match wins. Specific terms sit above generic ones ("laptop"
//! above "dell", "hair clipper" alongside "clipper"), so table order is
//! part of the behavior. Everything here is pure and deterministic.

/// One classification rule: a keyword and the category, subcategory, and
/// price band it maps to.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub keyword: &'static str,
    pub category: &'static str,
    pub subcategory: &'static str,
    pub min_price: i64,
    pub max_price: i64,
}

const fn rule(
    keyword: &'static str,
    category: &'static str,
    subcategory: &'static str,
    min_price: i64,
    max_price: i64,
) -> CategoryRule {
    CategoryRule {
        keyword,
        category,
        subcategory,
        min_price,
        max_price,
    }
}

/// Ordered keyword table. First keyword contained in the lowercased name
/// decides the category.
pub static CATEGORY_RULES: &[CategoryRule] = &[
    // Computing
    rule("laptop", "Computing", "Laptops", 15000, 30000),
    rule("dell", "Computing", "Laptops", 12000, 25000),
    rule("hp", "Computing", "Laptops", 10000, 20000),
    rule("acer", "Computing", "Laptops", 8000, 18000),
    rule("aspire", "Computing", "Laptops", 8000, 15000),
    rule("inspiron", "Computing", "Laptops", 12000, 22000),
    rule("desktop", "Computing", "Desktops", 8000, 15000),
    rule("microtower", "Computing", "Desktops", 10000, 18000),
    rule("imac", "Computing", "All-in-One", 25000, 50000),
    rule("aio", "Computing", "All-in-One", 15000, 30000),
    // Mobile
    rule("airpods", "Mobile", "Audio Accessories", 800, 1500),
    rule("iphone", "Mobile", "Smartphones", 5000, 15000),
    rule("samsung", "Mobile", "Smartphones", 3000, 12000),
    rule("nokia", "Mobile", "Smartphones", 500, 3000),
    rule("redmi", "Mobile", "Smartphones", 1500, 4000),
    rule("galaxy", "Mobile", "Smartphones", 3000, 12000),
    // Gaming
    rule("ps5", "Gaming", "Consoles", 8000, 12000),
    rule("ps4", "Gaming", "Controllers", 600, 1000),
    rule("nintendo", "Gaming", "Consoles", 4000, 8000),
    rule("gaming", "Gaming", "Accessories", 200, 1000),
    rule("controller", "Gaming", "Controllers", 400, 800),
    rule("dualsense", "Gaming", "Controllers", 600, 1000),
    rule("dualshock", "Gaming", "Controllers", 400, 700),
    // Audio/Video
    rule("jbl", "Audio/Video", "Speakers", 800, 2000),
    rule("harman", "Audio/Video", "Speakers", 800, 2000),
    rule("headset", "Audio/Video", "Headphones", 300, 1200),
    rule("headphone", "Audio/Video", "Headphones", 200, 1000),
    rule("microphone", "Audio/Video", "Microphones", 150, 600),
    rule("speaker", "Audio/Video", "Speakers", 400, 1500),
    rule("earbuds", "Audio/Video", "Earphones", 200, 800),
    rule("flip", "Audio/Video", "Portable Speakers", 800, 1500),
    rule("stereo", "Audio/Video", "Headphones", 200, 800),
    rule("wireless", "Audio/Video", "Wireless Audio", 300, 1000),
    // Networking
    rule("router", "Networking", "Routers", 800, 2000),
    rule("wifi", "Networking", "WiFi Devices", 500, 1500),
    rule("4g", "Networking", "Mobile Internet", 600, 1200),
    rule("lte", "Networking", "Mobile Internet", 600, 1200),
    rule("tp-link", "Networking", "Routers", 500, 1500),
    rule("d-link", "Networking", "Routers", 400, 1200),
    rule("dlink", "Networking", "Routers", 400, 1200),
    // Storage
    rule("ssd", "Storage", "Solid State Drives", 400, 1500),
    rule("hdd", "Storage", "Hard Drives", 300, 1000),
    rule("hard drive", "Storage", "Hard Drives", 300, 1000),
    rule("flash", "Storage", "USB Drives", 50, 300),
    rule("usb", "Accessories", "Cables", 20, 150),
    rule("sandisk", "Storage", "Memory Cards", 100, 500),
    rule("seagate", "Storage", "Hard Drives", 400, 1200),
    rule("toshiba", "Storage", "Hard Drives", 350, 1000),
    rule("transcend", "Storage", "Hard Drives", 500, 1500),
    rule("lexar", "Storage", "SSD", 300, 1000),
    // Displays
    rule("display", "Displays", "Monitors", 1500, 4000),
    rule("monitor", "Displays", "Monitors", 1200, 3500),
    rule("tv", "Displays", "Televisions", 2000, 8000),
    rule("akai", "Displays", "Televisions", 1800, 4000),
    rule("bruhm", "Displays", "Televisions", 2000, 5000),
    // Accessories
    rule("cable", "Accessories", "Cables", 30, 200),
    rule("hdmi", "Accessories", "Cables", 50, 300),
    rule("vga", "Accessories", "Cables", 40, 200),
    rule("adapter", "Accessories", "Adapters", 50, 300),
    rule("converter", "Accessories", "Converters", 80, 400),
    rule("hub", "Accessories", "USB Hubs", 150, 600),
    // Office
    rule("printer", "Office", "Printers", 1200, 4000),
    rule("canon", "Office", "Printers", 1000, 3000),
    rule("laser", "Office", "Printers", 1500, 5000),
    rule("toner", "Office", "Printer Supplies", 200, 600),
    rule("receipt", "Office", "POS Equipment", 800, 2000),
    rule("pos", "Office", "POS Equipment", 1500, 5000),
    rule("cash drawer", "Office", "POS Equipment", 1000, 2500),
    rule("scanner", "Office", "Scanners", 500, 1500),
    // Photography
    rule("camera", "Photography", "Cameras", 1000, 5000),
    rule("webcam", "Photography", "Web Cameras", 300, 800),
    rule("tripod", "Photography", "Tripods", 200, 800),
    rule("dji", "Photography", "Gimbals", 2000, 5000),
    rule("osmo", "Photography", "Gimbals", 2000, 5000),
    rule("fujifilm", "Photography", "Instant Cameras", 1200, 2500),
    rule("instax", "Photography", "Instant Cameras", 1200, 2500),
    rule("projector", "Photography", "Projectors", 1500, 4000),
    rule("light", "Photography", "Lighting", 200, 800),
    rule("ring light", "Photography", "Lighting", 300, 1000),
    // Wearables
    rule("watch", "Wearables", "Smart Watches", 300, 1500),
    rule("smart watch", "Wearables", "Smart Watches", 400, 1500),
    // Power
    rule("power bank", "Power", "Power Banks", 200, 800),
    rule("charging", "Power", "Chargers", 100, 400),
    rule("socket", "Power", "Power Strips", 150, 500),
    // Media
    rule("mi tv stick", "Media", "Streaming Devices", 400, 800),
    rule("tv stick", "Media", "Streaming Devices", 300, 700),
    // Security
    rule("cctv", "Security", "Cameras", 500, 1500),
    rule("counterfeit", "Security", "Detection Equipment", 1500, 3000),
    rule("money detector", "Security", "Detection Equipment", 1500, 3000),
    // Input devices
    rule("keyboard", "Input Devices", "Keyboards", 150, 600),
    rule("mouse", "Input Devices", "Mice", 100, 400),
    rule("combo", "Input Devices", "Keyboard & Mouse", 200, 700),
    rule("mouse pad", "Input Devices", "Mouse Pads", 50, 200),
    // Personal care
    rule("hair clipper", "Personal Care", "Hair Clippers", 200, 600),
    rule("clipper", "Personal Care", "Hair Clippers", 200, 600),
];

/// Fallback when no keyword matches. The default price is fixed, not
/// band-estimated.
const DEFAULT_CATEGORY: &str = "Electronics";
const DEFAULT_SUBCATEGORY: &str = "Other";
const DEFAULT_PRICE_GHS: i64 = 500;

/// A brand and the lowercase name fragments that identify it
#[derive(Debug, Clone)]
pub struct BrandRule {
    pub brand: &'static str,
    pub patterns: &'static [&'static str],
}

const fn brand(brand: &'static str, patterns: &'static [&'static str]) -> BrandRule {
    BrandRule { brand, patterns }
}

/// Ordered brand table. Patterns with trailing spaces ("hp ") avoid
/// matching inside other words.
pub static BRAND_RULES: &[BrandRule] = &[
    brand("HP", &["hp "]),
    brand("Dell", &["dell "]),
    brand("Acer", &["acer", "aspire"]),
    brand("Lenovo", &["lenovo"]),
    brand("Canon", &["canon"]),
    brand("Samsung", &["samsung"]),
    brand("Nokia", &["nokia"]),
    brand("Apple", &["airpods", "iphone", "imac"]),
    brand("Sony", &["sony"]),
    brand("JBL", &["jbl"]),
    brand("Logitech", &["logitech"]),
    brand("TP-Link", &["tp-link"]),
    brand("D-Link", &["d-link", "dlink"]),
    brand("Promate", &["promate"]),
    brand("Nintendo", &["nintendo"]),
    brand("DJI", &["dji"]),
    brand("Fujifilm", &["fujifilm"]),
    brand("SanDisk", &["sandisk"]),
    brand("Seagate", &["seagate"]),
    brand("Toshiba", &["toshiba"]),
    brand("Transcend", &["transcend"]),
    brand("Lexar", &["lexar"]),
    brand("Meetion", &["meetion"]),
    brand("Vertux", &["vertux"]),
    brand("ZKTECO", &["zkteco"]),
    brand("Akai", &["akai"]),
    brand("Bruhm", &["bruhm"]),
    brand("Boya", &["boya"]),
    brand("Modio", &["modio"]),
    brand("Redmi", &["redmi"]),
    brand("Pegasus", &["pegasus"]),
    brand("Philips", &["philips"]),
    brand("POStech", &["postech"]),
    brand("Nigachi", &["nigachi"]),
    brand("Imation", &["imation"]),
    brand("Dato", &["dato"]),
    brand("Coopic", &["coopic"]),
    brand("Onyx", &["onyx"]),
    brand("Mi", &["mi tv"]),
];

/// Keywords that bump the price estimate up by 30%
const PREMIUM_KEYWORDS: &[&str] = &["pro", "premium", "professional", "gaming", "wireless", "smart"];

/// Keywords that pull the price estimate down by 20%
const BUDGET_KEYWORDS: &[&str] = &["basic", "lite", "mini", "compact"];

/// Result of classifying one product name
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub category: &'static str,
    pub subcategory: &'static str,
    pub brand: String,
    pub price_ghs: i64,
}

/// Classify a product name: category, subcategory, brand, estimated price.
pub fn classify(name: &str) -> Classification {
    let lower = name.to_lowercase();
    let brand = detect_brand(name);

    match CATEGORY_RULES.iter().find(|r| lower.contains(r.keyword)) {
        Some(rule) => Classification {
            category: rule.category,
            subcategory: rule.subcategory,
            brand,
            price_ghs: estimate_price(&lower, rule.min_price, rule.max_price),
        },
        None => Classification {
            category: DEFAULT_CATEGORY,
            subcategory: DEFAULT_SUBCATEGORY,
            brand,
            price_ghs: DEFAULT_PRICE_GHS,
        },
    }
}

/// Brand from the ordered pattern table, else the name's first word.
pub fn detect_brand(name: &str) -> String {
    let lower = name.to_lowercase();
    for rule in BRAND_RULES {
        if rule.patterns.iter().any(|p| lower.contains(p)) {
            return rule.brand.to_string();
        }
    }
    name.split_whitespace()
        .next()
        .unwrap_or("Unknown")
        .to_string()
}

/// Estimate a price from the band midpoint, nudged by quality keywords
/// and at most one capacity multiplier, then clamped back into the band.
/// Each step truncates toward zero.
fn estimate_price(lower: &str, min_price: i64, max_price: i64) -> i64 {
    let mut base = (min_price + max_price) / 2;

    if PREMIUM_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        base = (base as f64 * 1.3) as i64;
    } else if BUDGET_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        base = (base as f64 * 0.8) as i64;
    }

    if lower.contains("tb") {
        if lower.contains("4tb") {
            base = (base as f64 * 2.5) as i64;
        } else if lower.contains("2tb") {
            base = (base as f64 * 1.8) as i64;
        } else if lower.contains("1tb") {
            base = (base as f64 * 1.3) as i64;
        }
    } else if lower.contains("gb") {
        if lower.contains("512gb") || lower.contains("256gb") {
            base = (base as f64 * 1.2) as i64;
        } else if lower.contains("128gb") {
            base = (base as f64 * 1.1) as i64;
        } else if lower.contains("32gb") || lower.contains("16gb") {
            base = (base as f64 * 0.9) as i64;
        }
    }

    base.clamp(min_price, max_price)
}

/// SKU from three-letter category and subcategory prefixes plus a
/// 1-based running index: "COM-LAP-0001"
pub fn make_sku(category: &str, subcategory: &str, index: usize) -> String {
    let cat: String = category.chars().take(3).collect();
    let sub: String = subcategory.chars().take(3).collect();
    format!("{}-{}-{:04}", cat.to_uppercase(), sub.to_uppercase(), index)
}

/// Marketing description for a classified product
pub fn description_for(category: &str, name: &str, brand: &str) -> String {
    match category {
        "Computing" => format!(
            "The {} delivers exceptional computing performance with modern features and reliable build quality. Perfect for both professional work and everyday computing tasks.",
            name
        ),
        "Mobile" => format!(
            "Experience cutting-edge mobile technology with the {}. Featuring advanced capabilities and sleek design for the modern user.",
            name
        ),
        "Gaming" => format!(
            "Elevate your gaming experience with the {}. Designed for serious gamers who demand precision, performance, and reliability.",
            name
        ),
        "Audio/Video" => format!(
            "Immerse yourself in superior sound quality with the {}. Engineered to deliver crystal-clear audio and exceptional performance.",
            name
        ),
        "Networking" => format!(
            "Stay connected with the {}. Featuring fast, reliable networking capabilities for seamless internet connectivity.",
            name
        ),
        "Storage" => format!(
            "Secure and expand your digital storage with the {}. Offering reliable data storage with fast access speeds.",
            name
        ),
        "Displays" => format!(
            "Enhance your visual experience with the {}. Featuring crisp, clear display technology for work and entertainment.",
            name
        ),
        "Office" => format!(
            "Boost your productivity with the {}. Professional-grade equipment designed for efficient office operations.",
            name
        ),
        "Photography" => format!(
            "Capture life's moments with the {}. Professional photography equipment for stunning results.",
            name
        ),
        "Wearables" => format!(
            "Stay connected and track your lifestyle with the {}. Modern wearable technology for the active user.",
            name
        ),
        _ => format!(
            "The {} from {} offers premium quality and reliable performance for all your technology needs.",
            name, brand
        ),
    }
}

/// Feature bullet list for a category, one "• " line per feature
pub fn features_for(category: &str) -> String {
    let features: &[&str] = match category {
        "Computing" => &[
            "High-performance processor",
            "Ample RAM and storage",
            "Modern connectivity options",
            "Energy efficient design",
            "Comprehensive warranty",
        ],
        "Mobile" => &[
            "Advanced camera system",
            "Long-lasting battery",
            "Fast charging capability",
            "Durable construction",
            "Latest operating system",
        ],
        "Gaming" => &[
            "Responsive controls",
            "Premium build quality",
            "Ergonomic design",
            "Universal compatibility",
            "Enhanced gaming experience",
        ],
        "Audio/Video" => &[
            "Superior sound quality",
            "Comfortable design",
            "Wireless connectivity",
            "Long battery life",
            "Noise cancellation",
        ],
        "Networking" => &[
            "High-speed connectivity",
            "Easy setup and configuration",
            "Reliable performance",
            "Security features",
            "Multiple device support",
        ],
        "Storage" => &[
            "Fast data transfer speeds",
            "Reliable data protection",
            "Compact design",
            "Universal compatibility",
            "Plug and play operation",
        ],
        _ => &[
            "Premium build quality",
            "Reliable performance",
            "Modern design",
            "User-friendly operation",
            "Comprehensive warranty",
        ],
    };

    features
        .iter()
        .map(|f| format!("• {}", f))
        .collect::<Vec<_>>()
        .join("\n")
}
