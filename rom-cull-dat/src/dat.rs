use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use rom_cull_core::{Entry, parse_entry};

use crate::error::DatError;

/// A parsed hierarchical Dat catalog (Logiqx/MAME-style XML).
#[derive(Debug, Clone)]
pub struct DatFile {
    pub header: DatHeader,
    pub games: Vec<DatGame>,
}

/// Header envelope of a Dat file, preserved verbatim through projection.
#[derive(Debug, Clone, Default)]
pub struct DatHeader {
    pub name: String,
    pub description: String,
    pub version: String,
    pub author: Option<String>,
    pub date: Option<String>,
    pub homepage: Option<String>,
    pub url: Option<String>,
}

/// A single game node from a Dat file.
#[derive(Debug, Clone)]
pub struct DatGame {
    pub name: String,
    pub description: String,
    /// Name of the parent this game is a clone of.
    pub clone_of: Option<String>,
    /// Set when the node is flagged `isbios="yes"`.
    pub is_bios: bool,
    pub year: Option<String>,
    pub manufacturer: Option<String>,
    /// ROM child nodes, carried through untouched for re-emission. The
    /// checksum attributes are never computed or verified here.
    pub roms: Vec<DatRom>,
}

/// A ROM node within a game, attributes kept as raw strings.
#[derive(Debug, Clone, Default)]
pub struct DatRom {
    pub name: String,
    pub size: Option<String>,
    pub crc: Option<String>,
    pub sha1: Option<String>,
    pub md5: Option<String>,
}

impl DatGame {
    fn new(name: String, clone_of: Option<String>, is_bios: bool) -> Self {
        Self {
            name,
            description: String::new(),
            clone_of,
            is_bios,
            year: None,
            manufacturer: None,
            roms: Vec::new(),
        }
    }
}

impl DatFile {
    /// Build core entries from the game nodes.
    ///
    /// Each entry's handle is its index into `games`, so projection can
    /// re-emit the original node for any winner.
    pub fn to_entries(&self) -> Vec<Entry> {
        self.games
            .iter()
            .enumerate()
            .map(|(i, game)| {
                let mut entry = parse_entry(&game.name)
                    .with_bios(game.is_bios)
                    .with_handle(i);
                if let Some(ref parent) = game.clone_of {
                    entry = entry.with_parent_key(parent.clone());
                }
                entry
            })
            .collect()
    }
}

/// Parse a Dat file from a reader.
///
/// Accepts both `<game>` and `<machine>` element names for the catalog
/// nodes.
pub fn parse_dat<R: BufRead>(reader: R) -> Result<DatFile, DatError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut dat = DatFile {
        header: DatHeader::default(),
        games: Vec::new(),
    };

    let mut in_header = false;
    let mut current_tag = String::new();
    let mut current_game: Option<DatGame> = None;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag_name.as_str() {
                    "header" => in_header = true,
                    "game" | "machine" => {
                        current_game = Some(parse_game_attributes(e)?);
                    }
                    _ => current_tag = tag_name,
                }
            }
            Event::Empty(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if tag_name == "rom" {
                    if let Some(ref mut game) = current_game {
                        game.roms.push(parse_rom_attributes(e)?);
                    }
                }
            }
            Event::Text(ref e) => {
                let text = e.unescape()?.to_string();
                if in_header {
                    match current_tag.as_str() {
                        "name" => dat.header.name = text,
                        "description" => dat.header.description = text,
                        "version" => dat.header.version = text,
                        "author" => dat.header.author = Some(text),
                        "date" => dat.header.date = Some(text),
                        "homepage" => dat.header.homepage = Some(text),
                        "url" => dat.header.url = Some(text),
                        _ => {}
                    }
                } else if let Some(ref mut game) = current_game {
                    match current_tag.as_str() {
                        "description" => game.description = text,
                        "year" => game.year = Some(text),
                        "manufacturer" => game.manufacturer = Some(text),
                        _ => {}
                    }
                }
            }
            Event::End(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag_name.as_str() {
                    "header" => in_header = false,
                    "game" | "machine" => {
                        if let Some(game) = current_game.take() {
                            dat.games.push(game);
                        }
                    }
                    _ => current_tag.clear(),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if dat.header.name.is_empty() && dat.games.is_empty() {
        return Err(DatError::invalid_dat("No header or games found in Dat file"));
    }

    Ok(dat)
}

/// Parse a Dat file from a file path.
pub fn parse_dat_file(path: &std::path::Path) -> Result<DatFile, DatError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    parse_dat(reader)
}

fn parse_game_attributes(e: &quick_xml::events::BytesStart<'_>) -> Result<DatGame, DatError> {
    let mut name = String::new();
    let mut clone_of = None;
    let mut is_bios = false;

    for attr in e.attributes() {
        let attr = attr?;
        let value = String::from_utf8_lossy(&attr.value).to_string();
        match attr.key.as_ref() {
            b"name" => name = value,
            b"cloneof" => clone_of = Some(value),
            b"isbios" => is_bios = value.eq_ignore_ascii_case("yes"),
            _ => {}
        }
    }

    Ok(DatGame::new(name, clone_of, is_bios))
}

fn parse_rom_attributes(e: &quick_xml::events::BytesStart<'_>) -> Result<DatRom, DatError> {
    let mut rom = DatRom::default();

    for attr in e.attributes() {
        let attr = attr?;
        let value = String::from_utf8_lossy(&attr.value).to_string();
        match attr.key.as_ref() {
            b"name" => rom.name = value,
            b"size" => rom.size = Some(value),
            b"crc" => rom.crc = Some(value),
            b"sha1" => rom.sha1 = Some(value),
            b"md5" => rom.md5 = Some(value),
            _ => {}
        }
    }

    Ok(rom)
}
