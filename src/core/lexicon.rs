/// Vocabulary lexicons — simulator identifier tokens to Japanese words.
///
/// Lookup is best-effort and never fails: unknown tokens pass through
/// untranslated. Entry order matters — the substring fallback scans
/// keys in declared order — so entries live in a `Vec` with an
/// `FxHashMap` index for the exact-match fast path.

use rustc_hash::FxHashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// An ordered mapping from cleaned identifier tokens to display words.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<(String, String)>,
    exact: FxHashMap<String, usize>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut lexicon = Lexicon::new();
        for (key, value) in pairs {
            lexicon.insert(key, value);
        }
        lexicon
    }

    /// Insert a mapping. Re-inserting a key updates its value in place
    /// without changing its position in the scan order.
    pub fn insert(&mut self, key: &str, value: &str) {
        match self.exact.get(key) {
            Some(&idx) => self.entries[idx].1 = value.to_string(),
            None => {
                self.exact.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), value.to_string()));
            }
        }
    }

    /// Load entries from a RON file holding a list of
    /// `("token", "word")` pairs, in scan order.
    pub fn load_from_ron(path: &Path) -> Result<Lexicon, LexiconError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse entries from a RON string.
    pub fn parse_ron(input: &str) -> Result<Lexicon, LexiconError> {
        let pairs: Vec<(String, String)> = ron::from_str(input)?;
        let mut lexicon = Lexicon::new();
        for (key, value) in &pairs {
            lexicon.insert(key, value);
        }
        Ok(lexicon)
    }

    /// Merge another lexicon into this one. Entries from `other`
    /// override same-key entries in `self`; new keys append after the
    /// existing scan order.
    pub fn merge(&mut self, other: &Lexicon) {
        for (key, value) in &other.entries {
            self.insert(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Translate a raw token: normalize, exact-match, then scan for
    /// the first key that is a substring of the normalized token.
    /// Falls back to the original string untouched.
    pub fn translate(&self, raw: &str) -> String {
        let token = normalize_token(raw);
        if let Some(&idx) = self.exact.get(&token) {
            return self.entries[idx].1.clone();
        }
        for (key, value) in &self.entries {
            if token.contains(key.as_str()) {
                return value.clone();
            }
        }
        raw.to_string()
    }
}

/// Clean a raw identifier down to a bare lookup token: lowercase,
/// strip `.`/`,`/`;`, drop one leading article, drop a trailing
/// instance number (simulator object numbering, optionally preceded
/// by a space or underscore), then squeeze out all whitespace.
pub fn normalize_token(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let unpunctuated: String = lowered
        .trim()
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | ';'))
        .collect();

    let dearticled = match unpunctuated.trim().split_once(char::is_whitespace) {
        Some((article, rest)) if matches!(article, "the" | "a" | "an" | "some") => {
            rest.trim_start()
        }
        _ => unpunctuated.trim(),
    };

    let without_digits = dearticled.trim_end_matches(|c: char| c.is_ascii_digit());
    let denumbered = if without_digits.len() != dearticled.len() {
        without_digits
            .strip_suffix(' ')
            .or_else(|| without_digits.strip_suffix('_'))
            .unwrap_or(without_digits)
    } else {
        dearticled
    };

    denumbered.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Furniture and fixture names.
pub fn locations() -> Lexicon {
    Lexicon::from_pairs(LOCATION_PAIRS)
}

/// Portable item names.
pub fn objects() -> Lexicon {
    Lexicon::from_pairs(OBJECT_PAIRS)
}

/// The two lexicons every narration pass needs.
#[derive(Debug, Clone)]
pub struct Lexicons {
    pub locations: Lexicon,
    pub objects: Lexicon,
}

impl Default for Lexicons {
    fn default() -> Self {
        Lexicons {
            locations: locations(),
            objects: objects(),
        }
    }
}

const LOCATION_PAIRS: &[(&str, &str)] = &[
    ("countertop", "カウンター"),
    ("cabinet", "キャビネット"),
    ("fridge", "冷蔵庫"),
    ("microwave", "電子レンジ"),
    ("sink", "シンク"),
    ("stoveburner", "コンロ"),
    ("toaster", "トースター"),
    ("table", "テーブル"),
    ("drawer", "引き出し"),
    ("shelf", "棚"),
    ("sofa", "ソファ"),
    ("bed", "ベッド"),
    ("desk", "デスク"),
    ("dresser", "タンス"),
    ("toilet", "トイレ"),
    ("bathtub", "浴槽"),
    ("garbagecan", "ゴミ箱"),
    ("sidetable", "サイドテーブル"),
    ("armchair", "アームチェア"),
    ("coffeetable", "コーヒーテーブル"),
    ("safe", "金庫"),
    ("coffeemachine", "コーヒーメーカー"),
    ("sinkbasin", "シンク"),
    ("bathtubbasin", "浴槽"),
];

const OBJECT_PAIRS: &[(&str, &str)] = &[
    ("the", "それ"),
    ("apple", "リンゴ"),
    ("bread", "パン"),
    ("cup", "カップ"),
    ("plate", "お皿"),
    ("knife", "ナイフ"),
    ("fork", "フォーク"),
    ("spoon", "スプーン"),
    ("bowl", "ボウル"),
    ("mug", "マグカップ"),
    ("egg", "卵"),
    ("potato", "ジャガイモ"),
    ("tomato", "トマト"),
    ("lettuce", "レタス"),
    ("laptop", "ノートパソコン"),
    ("cellphone", "携帯電話"),
    ("remotecontrol", "リモコン"),
    ("book", "本"),
    ("newspaper", "新聞"),
    ("soapbar", "石鹸"),
    ("toothbrush", "歯ブラシ"),
    ("toothpaste", "歯磨き粉"),
    ("towel", "タオル"),
    ("candle", "キャンドル"),
    ("pan", "フライパン"),
    ("pot", "鍋"),
    ("glassbottle", "瓶"),
    ("winebottle", "ワインボトル"),
    ("wateringcan", "ジョウロ"),
    ("statue", "像"),
    ("vase", "花瓶"),
    ("houseplant", "観葉植物"),
    ("peppershaker", "コショウ入れ"),
    ("saltshaker", "塩入れ"),
    ("keychain", "キーホルダー"),
    ("watch", "時計"),
    ("creditcard", "クレジットカード"),
    ("pencil", "鉛筆"),
    ("pen", "ペン"),
    ("soap", "石鹸"),
    ("desklamp", "卓上ランプ"),
    ("lightswitch", "スイッチ"),
];
