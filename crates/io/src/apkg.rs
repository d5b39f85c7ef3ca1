// Anki package (.apkg) deck writer
//
// An .apkg is a zip holding `collection.anki2` (SQLite, schema 11) and a
// `media` manifest. One note per accepted pair, one card per note.
//
// Re-import identity: the note type id is fixed and note guids are derived
// from the pair's content, so importing the same pairs again updates the
// existing notes instead of adding duplicates.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use log::info;
use rusqlite::{params, Connection};
use serde_json::{json, Value};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use vocabdeck_classifier::AcceptedPair;

use crate::error::DeckError;

/// Fixed note type id. Changing it breaks re-import into existing collections.
pub const MODEL_ID: i64 = 1597534682;
pub const MODEL_NAME: &str = "Vocabdeck Model v1";

const COLLECTION_ENTRY: &str = "collection.anki2";
const MEDIA_ENTRY: &str = "media";
const FIELD_SEPARATOR: &str = "\x1f";

const QUESTION_FORMAT: &str = r#"<div class="card-content">{{Question}}</div>"#;
const ANSWER_FORMAT: &str =
    r#"{{FrontSide}}<hr id="answer"><div class="card-content">{{Answer}}</div>"#;
const CARD_CSS: &str = "\
.card {
    font-family: arial;
    font-size: 20px;
    text-align: center;
    color: black;
    background-color: white;
}
.card-content {
    padding: 20px;
}
";

const SCHEMA: &str = r#"
CREATE TABLE col (
    id      integer primary key,
    crt     integer not null,
    mod     integer not null,
    scm     integer not null,
    ver     integer not null,
    dty     integer not null,
    usn     integer not null,
    ls      integer not null,
    conf    text not null,
    models  text not null,
    decks   text not null,
    dconf   text not null,
    tags    text not null
);
CREATE TABLE notes (
    id      integer primary key,
    guid    text not null,
    mid     integer not null,
    mod     integer not null,
    usn     integer not null,
    tags    text not null,
    flds    text not null,
    sfld    integer not null,
    csum    integer not null,
    flags   integer not null,
    data    text not null
);
CREATE TABLE cards (
    id      integer primary key,
    nid     integer not null,
    did     integer not null,
    ord     integer not null,
    mod     integer not null,
    usn     integer not null,
    type    integer not null,
    queue   integer not null,
    due     integer not null,
    ivl     integer not null,
    factor  integer not null,
    reps    integer not null,
    lapses  integer not null,
    left    integer not null,
    odue    integer not null,
    odid    integer not null,
    flags   integer not null,
    data    text not null
);
CREATE TABLE revlog (
    id      integer primary key,
    cid     integer not null,
    usn     integer not null,
    ease    integer not null,
    ivl     integer not null,
    lastIvl integer not null,
    factor  integer not null,
    time    integer not null,
    type    integer not null
);
CREATE TABLE graves (
    usn     integer not null,
    oid     integer not null,
    type    integer not null
);
CREATE INDEX ix_notes_usn on notes (usn);
CREATE INDEX ix_cards_usn on cards (usn);
CREATE INDEX ix_revlog_usn on revlog (usn);
CREATE INDEX ix_cards_nid on cards (nid);
CREATE INDEX ix_cards_sched on cards (did, queue, due);
CREATE INDEX ix_revlog_cid on revlog (cid);
CREATE INDEX ix_notes_csum on notes (csum);
"#;

// ---------------------------------------------------------------------------
// Deck identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    pub name: String,
    pub id: i64,
}

impl Deck {
    /// Deck with an id derived from its name, so rebuilding the same deck
    /// targets the same deck in the collection.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let id = deck_id_for_name(&name);
        Self { name, id }
    }

    pub fn with_id(name: impl Into<String>, id: i64) -> Self {
        Self { name: name.into(), id }
    }
}

/// Stable deck id in `[2^30, 2^31)`.
pub fn deck_id_for_name(name: &str) -> i64 {
    let digest = Sha256::digest(name.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    let n = u64::from_be_bytes(head) % (1 << 30);
    (1i64 << 30) + n as i64
}

/// Content-derived note guid.
pub fn note_guid(term: &str, definition: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(term.as_bytes());
    hasher.update(FIELD_SEPARATOR.as_bytes());
    hasher.update(definition.as_bytes());
    let digest = hasher.finalize();
    digest[..8].iter().map(|b| format!("{b:02x}")).collect()
}

/// Anki's duplicate-check checksum: the first 8 hex digits of the SHA-1 of
/// the sort field as plain text.
fn field_checksum(sort_field: &str) -> i64 {
    let digest = Sha1::digest(sort_field.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]) as i64
}

/// Anki fields are HTML.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Write `pairs` as an .apkg at `path`. Returns the number of cards written.
pub fn write_apkg(deck: &Deck, pairs: &[AcceptedPair], path: &Path) -> Result<usize, DeckError> {
    if pairs.is_empty() {
        return Err(DeckError::Empty);
    }

    let now_ms = chrono::Utc::now().timestamp_millis();

    // SQLite writes to a real file; build it in a scratch dir, then zip it.
    let staging = tempfile::tempdir()?;
    let db_path = staging.path().join(COLLECTION_ENTRY);
    {
        let conn = Connection::open(&db_path)?;
        build_collection(&conn, deck, pairs, now_ms)?;
    }

    let mut collection = Vec::new();
    File::open(&db_path)?.read_to_end(&mut collection)?;

    let out = File::create(path)?;
    let mut zip = ZipWriter::new(BufWriter::new(out));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(COLLECTION_ENTRY, options)?;
    zip.write_all(&collection)?;
    zip.start_file(MEDIA_ENTRY, options)?;
    zip.write_all(b"{}")?;
    zip.finish()?.flush()?;

    info!("wrote {} card(s) to {} (deck '{}')", pairs.len(), path.display(), deck.name);
    Ok(pairs.len())
}

/// Create the schema and fill the collection database.
pub fn build_collection(
    conn: &Connection,
    deck: &Deck,
    pairs: &[AcceptedPair],
    now_ms: i64,
) -> Result<(), DeckError> {
    let now_secs = now_ms / 1000;

    conn.execute_batch(SCHEMA)?;

    conn.execute(
        "INSERT INTO col (id, crt, mod, scm, ver, dty, usn, ls, conf, models, decks, dconf, tags)
         VALUES (1, ?1, ?2, ?3, 11, 0, 0, 0, ?4, ?5, ?6, ?7, '{}')",
        params![
            now_secs,
            now_ms,
            now_ms,
            collection_conf(deck).to_string(),
            models_json(deck, now_secs).to_string(),
            decks_json(deck, now_secs).to_string(),
            deck_options_json().to_string(),
        ],
    )?;

    conn.execute("BEGIN TRANSACTION", [])?;
    {
        let mut note_stmt = conn.prepare(
            "INSERT INTO notes (id, guid, mid, mod, usn, tags, flds, sfld, csum, flags, data)
             VALUES (?1, ?2, ?3, ?4, -1, '', ?5, ?6, ?7, 0, '')",
        )?;
        let mut card_stmt = conn.prepare(
            "INSERT INTO cards (id, nid, did, ord, mod, usn, type, queue, due, ivl, factor, reps, lapses, left, odue, odid, flags, data)
             VALUES (?1, ?2, ?3, 0, ?4, -1, 0, 0, ?5, 0, 0, 0, 0, 0, 0, 0, 0, '')",
        )?;

        for (i, pair) in pairs.iter().enumerate() {
            let id = now_ms + i as i64;
            let question = escape_html(&pair.term);
            let answer = escape_html(&pair.definition);
            let fields = format!("{question}{FIELD_SEPARATOR}{answer}");

            note_stmt.execute(params![
                id,
                note_guid(&pair.term, &pair.definition),
                MODEL_ID,
                now_secs,
                fields,
                pair.term,
                field_checksum(&pair.term),
            ])?;
            card_stmt.execute(params![id, id, deck.id, now_secs, i as i64 + 1])?;
        }
    }
    conn.execute("COMMIT", [])?;

    Ok(())
}

fn collection_conf(deck: &Deck) -> Value {
    json!({
        "activeDecks": [deck.id],
        "curDeck": deck.id,
        "newSpread": 0,
        "collapseTime": 1200,
        "timeLim": 0,
        "estTimes": true,
        "dueCounts": true,
        "curModel": MODEL_ID.to_string(),
        "nextPos": 1,
        "sortType": "noteFld",
        "sortBackwards": false,
        "addToCur": true,
    })
}

fn models_json(deck: &Deck, now_secs: i64) -> Value {
    let field = |name: &str, ord: u32| {
        json!({
            "name": name,
            "ord": ord,
            "sticky": false,
            "rtl": false,
            "font": "Arial",
            "size": 20,
            "media": [],
        })
    };

    let model = json!({
        "id": MODEL_ID,
        "name": MODEL_NAME,
        "type": 0,
        "mod": now_secs,
        "usn": -1,
        "sortf": 0,
        "did": deck.id,
        "tmpls": [{
            "name": "Card 1",
            "ord": 0,
            "qfmt": QUESTION_FORMAT,
            "afmt": ANSWER_FORMAT,
            "bqfmt": "",
            "bafmt": "",
            "did": null,
        }],
        "flds": [field("Question", 0), field("Answer", 1)],
        "css": CARD_CSS,
        "latexPre": "\\documentclass[12pt]{article}\n\\special{papersize=3in,5in}\n\\usepackage[utf8]{inputenc}\n\\usepackage{amssymb,amsmath}\n\\pagestyle{empty}\n\\setlength{\\parindent}{0in}\n\\begin{document}\n",
        "latexPost": "\\end{document}",
        "tags": [],
        "vers": [],
        "req": [[0, "any", [0]]],
    });

    json!({ MODEL_ID.to_string(): model })
}

fn deck_json(id: i64, name: &str, now_secs: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "desc": "",
        "mod": now_secs,
        "usn": -1,
        "collapsed": false,
        "conf": 1,
        "dyn": 0,
        "extendNew": 10,
        "extendRev": 50,
        "lrnToday": [0, 0],
        "newToday": [0, 0],
        "revToday": [0, 0],
        "timeToday": [0, 0],
    })
}

fn decks_json(deck: &Deck, now_secs: i64) -> Value {
    json!({
        "1": deck_json(1, "Default", now_secs),
        deck.id.to_string(): deck_json(deck.id, &deck.name, now_secs),
    })
}

fn deck_options_json() -> Value {
    json!({
        "1": {
            "id": 1,
            "name": "Default",
            "mod": 0,
            "usn": 0,
            "dyn": false,
            "autoplay": true,
            "replayq": true,
            "timer": 0,
            "maxTaken": 60,
            "new": {
                "bury": true,
                "delays": [1.0, 10.0],
                "initialFactor": 2500,
                "ints": [1, 4, 7],
                "order": 1,
                "perDay": 20,
                "separate": true,
            },
            "lapse": {
                "delays": [10.0],
                "leechAction": 0,
                "leechFails": 8,
                "minInt": 1,
                "mult": 0.0,
            },
            "rev": {
                "bury": true,
                "ease4": 1.3,
                "fuzz": 0.05,
                "ivlFct": 1.0,
                "maxIvl": 36500,
                "minSpace": 1,
                "perDay": 100,
            },
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
