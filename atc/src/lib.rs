pub mod config;
pub mod entities;
pub mod geometry;
pub mod phraseology;
pub mod session;

const PHONETIC_ALPHABET: [(char, &str); 26] = [
  ('A', "Alpha"),
  ('B', "Bravo"),
  ('C', "Charlie"),
  ('D', "Delta"),
  ('E', "Echo"),
  ('F', "Foxtrot"),
  ('G', "Golf"),
  ('H', "Hotel"),
  ('I', "India"),
  ('J', "Juliet"),
  ('K', "Kilo"),
  ('L', "Lima"),
  ('M', "Mike"),
  ('N', "November"),
  ('O', "Oscar"),
  ('P', "Papa"),
  ('Q', "Quebec"),
  ('R', "Romeo"),
  ('S', "Sierra"),
  ('T', "Tango"),
  ('U', "Uniform"),
  ('V', "Victor"),
  ('W', "Whiskey"),
  ('X', "X-ray"),
  ('Y', "Yankee"),
  ('Z', "Zulu"),
];

const PHONETIC_NUMBERS: [(char, &str); 10] = [
  ('0', "Zero"),
  ('1', "One"),
  ('2', "Two"),
  ('3', "Three"),
  ('4', "Four"),
  ('5', "Five"),
  ('6', "Six"),
  ('7', "Seven"),
  ('8', "Eight"),
  ('9', "Niner"),
];

const AIRLINE_PREFIXES: [(&str, &str); 5] = [
  ("SPEEDBIRD", "Speedbird"),
  ("LUFTHANSA", "Lufthansa"),
  ("UNITED", "United"),
  ("DELTA", "Delta"),
  ("AMERICAN", "American"),
];

/// Transliterates text into the phonetic alphabet, one word per character.
/// Whitespace is dropped; characters outside the tables pass through as-is.
pub fn phonetic(text: impl AsRef<str>) -> String {
  let mut words: Vec<String> = Vec::new();

  for c in text.as_ref().chars() {
    let c = c.to_ascii_uppercase();
    if let Some(word) = PHONETIC_ALPHABET
      .into_iter()
      .find_map(|(ch, s)| (c == ch).then_some(s))
    {
      words.push(word.to_owned());
    } else if let Some(word) = PHONETIC_NUMBERS
      .into_iter()
      .find_map(|(ch, s)| (c == ch).then_some(s))
    {
      words.push(word.to_owned());
    } else if c.is_whitespace() {
      continue;
    } else {
      words.push(c.to_string());
    }
  }

  words.join(" ")
}

/// Renders a callsign for radio: a recognized airline prefix is spoken
/// literally, the remainder (or the whole callsign) is transliterated.
pub fn spell_callsign(callsign: impl AsRef<str>) -> String {
  let callsign = callsign.as_ref();

  for (prefix, spoken) in AIRLINE_PREFIXES {
    if let Some(rest) = callsign.strip_prefix(prefix) {
      return format!("{} {}", spoken, phonetic(rest));
    }
  }

  phonetic(callsign)
}
