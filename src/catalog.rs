//! Static reference table of deep-sky objects.
//!
//! Entries are keyed either by a normalized catalog token (`M42`, `NGC6888`,
//! `SH2-132`, `A21`, `VDB14`) or by an uppercased common-name word (`ORION`).
//! Declaration order matters: [`common_names`] iterates in this order and the
//! resolver takes the first containment hit.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Broad object class, shown by `resolve` and grouped in the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Nebula,
    DarkNebula,
    Galaxy,
    GalaxyCluster,
    StarCluster,
}

impl ObjectKind {
    pub fn label(&self) -> &'static str {
        match self {
            ObjectKind::Nebula => "nebula",
            ObjectKind::DarkNebula => "dark nebula",
            ObjectKind::Galaxy => "galaxy",
            ObjectKind::GalaxyCluster => "galaxy cluster",
            ObjectKind::StarCluster => "star cluster",
        }
    }
}

/// One row of the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub key: &'static str,
    pub designation: &'static str,
    pub name: &'static str,
    pub kind: ObjectKind,
}

const fn entry(
    key: &'static str,
    designation: &'static str,
    name: &'static str,
    kind: ObjectKind,
) -> CatalogEntry {
    CatalogEntry {
        key,
        designation,
        name,
        kind,
    }
}

use ObjectKind::*;

pub static CATALOG: &[CatalogEntry] = &[
    // Messier
    entry("M1", "M1", "Crab Nebula", Nebula),
    entry("M2", "M2", "Globular Cluster M2", StarCluster),
    entry("M3", "M3", "Globular Cluster M3", StarCluster),
    entry("M4", "M4", "Globular Cluster M4", StarCluster),
    entry("M5", "M5", "Globular Cluster M5", StarCluster),
    entry("M6", "M6", "Butterfly Cluster", StarCluster),
    entry("M7", "M7", "Ptolemy Cluster", StarCluster),
    entry("M8", "M8", "Lagoon Nebula", Nebula),
    entry("M11", "M11", "Wild Duck Cluster", StarCluster),
    entry("M13", "M13", "Great Globular Cluster in Hercules", StarCluster),
    entry("M15", "M15", "Globular Cluster M15", StarCluster),
    entry("M16", "M16", "Eagle Nebula", Nebula),
    entry("M17", "M17", "Omega Nebula", Nebula),
    entry("M20", "M20", "Trifid Nebula", Nebula),
    entry("M22", "M22", "Sagittarius Cluster", StarCluster),
    entry("M27", "M27", "Dumbbell Nebula", Nebula),
    entry("M31", "M31", "Andromeda Galaxy", Galaxy),
    entry("M32", "M32", "Elliptical Galaxy M32", Galaxy),
    entry("M33", "M33", "Triangulum Galaxy", Galaxy),
    entry("M35", "M35", "Open Cluster M35", StarCluster),
    entry("M36", "M36", "Pinwheel Cluster", StarCluster),
    entry("M37", "M37", "Open Cluster M37", StarCluster),
    entry("M38", "M38", "Starfish Cluster", StarCluster),
    entry("M42", "M42", "Orion Nebula", Nebula),
    entry("M43", "M43", "De Mairan's Nebula", Nebula),
    entry("M44", "M44", "Beehive Cluster", StarCluster),
    entry("M45", "M45", "Pleiades", StarCluster),
    entry("M46", "M46", "Open Cluster M46", StarCluster),
    entry("M47", "M47", "Open Cluster M47", StarCluster),
    entry("M50", "M50", "Open Cluster M50", StarCluster),
    entry("M51", "M51", "Whirlpool Galaxy", Galaxy),
    entry("M52", "M52", "Open Cluster M52", StarCluster),
    entry("M57", "M57", "Ring Nebula", Nebula),
    entry("M63", "M63", "Sunflower Galaxy", Galaxy),
    entry("M64", "M64", "Black Eye Galaxy", Galaxy),
    entry("M65", "M65", "Leo Triplet Galaxy", Galaxy),
    entry("M66", "M66", "Leo Triplet Galaxy", Galaxy),
    entry("M67", "M67", "King Cobra Cluster", StarCluster),
    entry("M78", "M78", "Reflection Nebula M78", Nebula),
    entry("M81", "M81", "Bode's Galaxy", Galaxy),
    entry("M82", "M82", "Cigar Galaxy", Galaxy),
    entry("M92", "M92", "Globular Cluster M92", StarCluster),
    entry("M94", "M94", "Cat's Eye Galaxy", Galaxy),
    entry("M95", "M95", "Barred Spiral Galaxy M95", Galaxy),
    entry("M96", "M96", "Elliptical Galaxy M96", Galaxy),
    entry("M97", "M97", "Owl Nebula", Nebula),
    entry("M101", "M101", "Pinwheel Galaxy", Galaxy),
    entry("M103", "M103", "Open Cluster M103", StarCluster),
    entry("M104", "M104", "Sombrero Galaxy", Galaxy),
    entry("M106", "M106", "Spiral Galaxy M106", Galaxy),
    entry("M108", "M108", "Surfboard Galaxy", Galaxy),
    entry("M109", "M109", "Barred Spiral Galaxy M109", Galaxy),
    entry("M110", "M110", "Elliptical Galaxy M110", Galaxy),
    // NGC
    entry("NGC224", "NGC224", "Andromeda Galaxy", Galaxy),
    entry("NGC253", "NGC253", "Sculptor Galaxy", Galaxy),
    entry("NGC281", "NGC281", "Pacman Nebula", Nebula),
    entry("NGC598", "NGC598", "Triangulum Galaxy", Galaxy),
    entry("NGC869", "NGC869", "Double Cluster", StarCluster),
    entry("NGC884", "NGC884", "Double Cluster", StarCluster),
    entry("NGC891", "NGC891", "Silver Sliver Galaxy", Galaxy),
    entry("NGC1316", "NGC1316", "Fornax A Galaxy", Galaxy),
    entry("NGC1499", "NGC1499", "California Nebula", Nebula),
    entry("NGC1952", "NGC1952", "Crab Nebula", Nebula),
    entry("NGC1976", "NGC1976", "Orion Nebula", Nebula),
    entry("NGC1977", "NGC1977", "Running Man Nebula", Nebula),
    entry("NGC2024", "NGC2024", "Flame Nebula", Nebula),
    entry("NGC2070", "NGC2070", "Tarantula Nebula", Nebula),
    entry("NGC2175", "NGC2175", "Monkey Head Nebula", Nebula),
    entry("NGC2237", "NGC2237", "Rosette Nebula", Nebula),
    entry("NGC2244", "NGC2244", "Rosette Nebula Open Cluster", StarCluster),
    entry("NGC2264", "NGC2264", "Cone Nebula", Nebula),
    entry("NGC2359", "NGC2359", "Thor's Helmet", Nebula),
    entry("NGC3372", "NGC3372", "Carina Nebula", Nebula),
    entry("NGC4565", "NGC4565", "Needle Galaxy", Galaxy),
    entry("NGC5128", "NGC5128", "Centaurus A", Galaxy),
    entry("NGC5194", "NGC5194", "Whirlpool Galaxy", Galaxy),
    entry("NGC6302", "NGC6302", "Bug Nebula", Nebula),
    entry("NGC6334", "NGC6334", "Cat's Paw Nebula", Nebula),
    entry("NGC6543", "NGC6543", "Cat's Eye Nebula", Nebula),
    entry("NGC6720", "NGC6720", "Ring Nebula", Nebula),
    entry("NGC6888", "NGC6888", "Crescent Nebula", Nebula),
    entry("NGC6939", "NGC6939", "NGC6939 Cluster", StarCluster),
    entry("NGC6960", "NGC6960", "Western Veil Nebula", Nebula),
    entry("NGC6992", "NGC6992", "Eastern Veil Nebula", Nebula),
    entry("NGC7000", "NGC7000", "North America Nebula", Nebula),
    entry("NGC7293", "NGC7293", "Helix Nebula", Nebula),
    entry("NGC7380", "NGC7380", "Wizard Nebula", Nebula),
    entry("NGC7635", "NGC7635", "Bubble Nebula", Nebula),
    entry("NGC7822", "NGC7822", "NGC7822 Nebula", Nebula),
    // IC
    entry("IC63", "IC63", "Ghost of Cassiopeia", Nebula),
    entry("IC410", "IC410", "Tadpoles Nebula", Nebula),
    entry("IC417", "IC417", "Spider Nebula", Nebula),
    entry("IC434", "IC434", "Horsehead Nebula", Nebula),
    entry("IC443", "IC443", "Jellyfish Nebula", Nebula),
    entry("IC1284", "IC1284", "IC1284 Nebula", Nebula),
    entry("IC1295", "IC1295", "IC1295 Nebula", Nebula),
    entry("IC1318", "IC1318", "Butterfly Nebula", Nebula),
    entry("IC1396", "IC1396", "Elephant's Trunk Nebula", Nebula),
    entry("IC1805", "IC1805", "Heart Nebula", Nebula),
    entry("IC1848", "IC1848", "Soul Nebula", Nebula),
    entry("IC2118", "IC2118", "Witch Head Nebula", Nebula),
    entry("IC2177", "IC2177", "Seagull Nebula", Nebula),
    entry("IC4628", "IC4628", "Prawn Nebula", Nebula),
    entry("IC5070", "IC5070", "Pelican Nebula", Nebula),
    entry("IC5146", "IC5146", "Cocoon Nebula", Nebula),
    // Caldwell
    entry("C1", "C1", "NGC188", StarCluster),
    entry("C2", "C2", "NGC40", Nebula),
    entry("C4", "C4", "Iris Nebula", Nebula),
    entry("C14", "C14", "Double Cluster", StarCluster),
    entry("C20", "C20", "North America Nebula", Nebula),
    entry("C27", "C27", "Crescent Nebula", Nebula),
    entry("C33", "C33", "Eastern Veil Nebula", Nebula),
    entry("C34", "C34", "Western Veil Nebula", Nebula),
    entry("C49", "C49", "Rosette Nebula", Nebula),
    entry("C50", "C50", "Cone Nebula", Nebula),
    // Sharpless
    entry("SH2-101", "Sh2-101", "Tulip Nebula", Nebula),
    entry("SH2-115", "Sh2-115", "Abell 71", Nebula),
    entry("SH2-129", "Sh2-129", "Flying Bat Nebula", Nebula),
    entry("SH2-132", "Sh2-132", "Lion Nebula", Nebula),
    entry("SH2-140", "Sh2-140", "Wizard Nebula", Nebula),
    entry("SH2-155", "Sh2-155", "Cave Nebula", Nebula),
    entry("SH2-185", "Sh2-185", "Sh2-185 Nebula", Nebula),
    entry("SH2-212", "Sh2-212", "Sh2-212 Nebula", Nebula),
    entry("SH2-216", "Sh2-216", "Lower's Nebula", Nebula),
    entry("SH2-240", "Sh2-240", "Simeis 147", Nebula),
    entry("SH2-254", "Sh2-254", "Sh2-254 Nebula", Nebula),
    entry("SH2-308", "Sh2-308", "Dolphin Head Nebula", Nebula),
    // Barnard dark nebulae
    entry("B33", "B33", "Horsehead Nebula", DarkNebula),
    entry("B72", "B72", "Snake Nebula", DarkNebula),
    entry("B86", "B86", "Ink Spot Nebula", DarkNebula),
    entry("B142", "B142", "E Nebula", DarkNebula),
    entry("B143", "B143", "E Nebula", DarkNebula),
    entry("B150", "B150", "Seahorse Nebula", DarkNebula),
    // Abell
    entry("A21", "Abell 21", "Medusa Nebula", Nebula),
    entry("A39", "Abell 39", "Abell 39", Nebula),
    entry("A426", "Abell 426", "Perseus Cluster", GalaxyCluster),
    // van den Bergh reflection nebulae
    entry("VDB14", "vdB 14", "vdB 14", Nebula),
    entry("VDB15", "vdB 15", "vdB 15", Nebula),
    entry("VDB149", "vdB 149", "Reflection Nebula vdB 149", Nebula),
    entry("VDB152", "vdB 152", "Reflection Nebula vdB 152", Nebula),
    // Common names
    entry("ANDROMEDA", "M31", "Andromeda Galaxy", Galaxy),
    entry("ORION", "M42", "Orion Nebula", Nebula),
    entry("PLEIADES", "M45", "Pleiades", StarCluster),
    entry("WHIRLPOOL", "M51", "Whirlpool Galaxy", Galaxy),
    entry("CRAB", "M1", "Crab Nebula", Nebula),
    entry("RING", "M57", "Ring Nebula", Nebula),
    entry("EAGLE", "M16", "Eagle Nebula", Nebula),
    entry("LAGOON", "M8", "Lagoon Nebula", Nebula),
    entry("TRIFID", "M20", "Trifid Nebula", Nebula),
    entry("DUMBBELL", "M27", "Dumbbell Nebula", Nebula),
    entry("TRIANGULUM", "M33", "Triangulum Galaxy", Galaxy),
    entry("PINWHEEL", "M101", "Pinwheel Galaxy", Galaxy),
    entry("SOMBRERO", "M104", "Sombrero Galaxy", Galaxy),
    entry("BODES", "M81", "Bode's Galaxy", Galaxy),
    entry("CIGAR", "M82", "Cigar Galaxy", Galaxy),
    entry("OWL", "M97", "Owl Nebula", Nebula),
    entry("SUNFLOWER", "M63", "Sunflower Galaxy", Galaxy),
    entry("BLACKEYE", "M64", "Black Eye Galaxy", Galaxy),
    entry("BEEHIVE", "M44", "Beehive Cluster", StarCluster),
    entry("HERCULES", "M13", "Great Globular Cluster in Hercules", StarCluster),
    entry("HORSEHEAD", "B33", "Horsehead Nebula", DarkNebula),
    entry("FLAME", "NGC2024", "Flame Nebula", Nebula),
    entry("ROSETTE", "NGC2237", "Rosette Nebula", Nebula),
    entry("CONE", "NGC2264", "Cone Nebula", Nebula),
    entry("CALIFORNIA", "NGC1499", "California Nebula", Nebula),
    entry("RUNNING", "NGC1977", "Running Man Nebula", Nebula),
    entry("HEART", "IC1805", "Heart Nebula", Nebula),
    entry("SOUL", "IC1848", "Soul Nebula", Nebula),
    entry("WITCH", "IC2118", "Witch Head Nebula", Nebula),
    entry("SEAGULL", "IC2177", "Seagull Nebula", Nebula),
    entry("COCOON", "IC5146", "Cocoon Nebula", Nebula),
    entry("PELICAN", "IC5070", "Pelican Nebula", Nebula),
    entry("ELEPHANT", "IC1396", "Elephant's Trunk Nebula", Nebula),
    entry("TADPOLES", "IC410", "Tadpoles Nebula", Nebula),
    entry("BUTTERFLY", "IC1318", "Butterfly Nebula", Nebula),
    entry("JELLYFISH", "IC443", "Jellyfish Nebula", Nebula),
    entry("SPIDER", "IC417", "Spider Nebula", Nebula),
    entry("CRESCENT", "NGC6888", "Crescent Nebula", Nebula),
    entry("BUBBLE", "NGC7635", "Bubble Nebula", Nebula),
    entry("VEIL", "NGC6960", "Western Veil Nebula", Nebula),
    entry("EASTERN", "NGC6992", "Eastern Veil Nebula", Nebula),
    entry("WESTERN", "NGC6960", "Western Veil Nebula", Nebula),
    entry("NORTH", "NGC7000", "North America Nebula", Nebula),
    entry("AMERICA", "NGC7000", "North America Nebula", Nebula),
    entry("HELIX", "NGC7293", "Helix Nebula", Nebula),
    entry("PACMAN", "NGC281", "Pacman Nebula", Nebula),
    entry("WIZARD", "NGC7380", "Wizard Nebula", Nebula),
    entry("CARINA", "NGC3372", "Carina Nebula", Nebula),
    entry("NEEDLE", "NGC4565", "Needle Galaxy", Galaxy),
    entry("CENTAURUS", "NGC5128", "Centaurus A", Galaxy),
    entry("THOR", "NGC2359", "Thor's Helmet", Nebula),
    entry("HELMET", "NGC2359", "Thor's Helmet", Nebula),
    entry("MONKEY", "NGC2175", "Monkey Head Nebula", Nebula),
    entry("TARANTULA", "NGC2070", "Tarantula Nebula", Nebula),
    entry("CATS", "NGC6334", "Cat's Paw Nebula", Nebula),
    entry("BUG", "NGC6302", "Bug Nebula", Nebula),
    entry("MEDUSA", "Abell 21", "Medusa Nebula", Nebula),
    entry("TULIP", "Sh2-101", "Tulip Nebula", Nebula),
    entry("CAVE", "Sh2-155", "Cave Nebula", Nebula),
    entry("FLYING", "Sh2-129", "Flying Bat Nebula", Nebula),
    entry("BAT", "Sh2-129", "Flying Bat Nebula", Nebula),
    entry("LION", "Sh2-132", "Lion Nebula", Nebula),
    entry("DOLPHIN", "Sh2-308", "Dolphin Head Nebula", Nebula),
    entry("DOUBLE", "NGC869", "Double Cluster", StarCluster),
    entry("IRIS", "C4", "Iris Nebula", Nebula),
    entry("SCULPTOR", "NGC253", "Sculptor Galaxy", Galaxy),
    entry("SILVER", "NGC891", "Silver Sliver Galaxy", Galaxy),
    entry("SLIVER", "NGC891", "Silver Sliver Galaxy", Galaxy),
    entry("FORNAX", "NGC1316", "Fornax A Galaxy", Galaxy),
    entry("PRAWN", "IC4628", "Prawn Nebula", Nebula),
    entry("GHOST", "IC63", "Ghost of Cassiopeia", Nebula),
    entry("CASSIOPEIA", "IC63", "Ghost of Cassiopeia", Nebula),
];

static INDEX: Lazy<HashMap<&'static str, &'static CatalogEntry>> =
    Lazy::new(|| CATALOG.iter().map(|e| (e.key, e)).collect());

/// Exact lookup by normalized (uppercased) key.
pub fn lookup(key: &str) -> Option<&'static CatalogEntry> {
    INDEX.get(key).copied()
}

/// True for keys shaped like a catalog number (`M42`, `SH2-132`) rather than
/// a common-name word.
pub fn is_catalog_key(key: &str) -> bool {
    let letters = key.chars().take_while(|c| c.is_ascii_uppercase()).count();
    letters > 0 && key[letters..].starts_with(|c: char| c.is_ascii_digit())
}

/// Object class of a stored designation (`"Sh2-132"`, `"Abell 21"`), if the
/// table knows it.
pub fn kind_of(designation: &str) -> Option<ObjectKind> {
    CATALOG
        .iter()
        .find(|e| e.designation == designation)
        .map(|e| e.kind)
}

/// Common-name entries in declaration order.
pub fn common_names() -> impl Iterator<Item = &'static CatalogEntry> {
    CATALOG.iter().filter(|e| !is_catalog_key(e.key))
}
