//! Static word banks for drill synthesis.
//!
//! One pool per letter, each word featuring that letter at least once and
//! usually more, plus a neutral filler list with no bias toward any key.

/// Words emphasizing `letter`, or an empty slice for non-letter keys.
pub fn bank_for(letter: char) -> &'static [&'static str] {
    match letter {
        'a' => &[
            "banana", "drama", "canal", "salad", "arena", "alpaca", "atlas", "strata", "amaze",
            "guitar", "karma", "pajama",
        ],
        'b' => &[
            "bubble", "rabbit", "ribbon", "hobby", "babble", "bamboo", "bobbin", "rubber",
            "blurb", "bramble",
        ],
        'c' => &[
            "circle", "concert", "accent", "cactus", "occur", "click", "circus", "concrete",
            "cycle", "succinct", "chance",
        ],
        'd' => &[
            "ladder", "daddy", "divided", "candid", "hidden", "addend", "dread", "midday",
            "dodged", "sudden",
        ],
        'e' => &[
            "needle", "tepee", "settee", "beetle", "degree", "freeze", "delete", "sleeve",
            "esteem", "between",
        ],
        'f' => &[
            "fluff", "offer", "fifteen", "muffin", "toffee", "sniff", "effort", "affix",
            "waffle", "fifty",
        ],
        'g' => &[
            "giggle", "gadget", "jogging", "luggage", "gargle", "goggles", "nugget", "haggle",
            "legging", "gauge",
        ],
        'h' => &[
            "rhythm", "highland", "hutch", "hither", "hush", "thatch", "hatch", "heath",
            "hitch", "health",
        ],
        'i' => &[
            "mimic", "civic", "idiom", "vivid", "limit", "infinite", "timid", "divide",
            "digit", "initial",
        ],
        'j' => &[
            "jazz", "junior", "jungle", "jockey", "jumbo", "jigsaw", "adjust", "judge",
            "jacket", "eject",
        ],
        'k' => &[
            "kayak", "knack", "kettle", "kiosk", "kicker", "khaki", "knock", "kinky",
            "market", "skunk",
        ],
        'l' => &[
            "lull", "level", "llama", "jelly", "skull", "trill", "enroll", "fellow",
            "hollow", "valley",
        ],
        'm' => &[
            "murmur", "mammal", "mammoth", "hammer", "summer", "mumble", "immense", "maxim",
            "gimmick", "symmetry",
        ],
        'n' => &[
            "nanny", "noon", "cannon", "banner", "nation", "engine", "linen", "antenna",
            "tendon", "winning",
        ],
        'o' => &[
            "oblong", "onion", "cocoon", "propose", "odor", "monsoon", "follow", "rococo",
            "common", "voodoo",
        ],
        'p' => &[
            "pepper", "puppet", "propel", "purple", "pippin", "supper", "apple", "popper",
            "upkeep", "plump",
        ],
        'q' => &[
            "quick", "queen", "quartz", "quiet", "quote", "quilt", "squad", "sequin",
            "liquid", "equip", "opaque", "banquet",
        ],
        'r' => &[
            "mirror", "terror", "roar", "rural", "error", "horror", "warrior", "artery",
            "carrier", "barrier",
        ],
        's' => &[
            "assess", "sassy", "glasses", "session", "scissors", "missus", "system", "stress",
            "seesaw", "basis",
        ],
        't' => &[
            "tattoo", "total", "stutter", "tactic", "tartan", "attempt", "estate", "tatty",
            "titter", "tightest",
        ],
        'u' => &[
            "unusual", "usurp", "upturn", "murmur", "humus", "unduly", "uncut", "submit",
            "untruth", "sulfur",
        ],
        'v' => &[
            "vivid", "velvet", "verve", "valve", "swivel", "revive", "savvy", "avail",
            "vivace", "viva",
        ],
        'w' => &[
            "window", "willow", "wayward", "swallow", "awkward", "twelve", "whew", "wigwam",
            "winnow", "waterway",
        ],
        'x' => &[
            "xylophone", "boxer", "exact", "extra", "taxi", "pixel", "toxic", "saxophone",
            "exile", "galaxy", "maximum",
        ],
        'y' => &[
            "yearly", "yoyo", "yummy", "byway", "gypsy", "syzygy", "sunny", "mystery",
            "symphony", "anyway",
        ],
        'z' => &[
            "zigzag", "pizza", "buzz", "fizzy", "dazzle", "blizzard", "puzzle", "sizzle",
            "zealot", "zest", "zombie", "zipper",
        ],
        _ => &[],
    }
}

/// Neutral filler words, independent of any key statistics.
pub const FILLER: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "her", "was", "one", "our",
    "out", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old", "see", "two",
    "way", "who",
];

/// Every word in every letter pool, for multi-key bonus lookups.
pub fn all_bank_words() -> impl Iterator<Item = &'static str> {
    ('a'..='z').flat_map(|c| bank_for(c).iter().copied())
}
