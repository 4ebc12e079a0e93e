use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::dat::{DatFile, DatGame};
use crate::error::DatError;

const DOCTYPE: &str = r#"datafile SYSTEM "http://www.logiqx.com/Dats/datafile.dtd""#;

/// Serialize a Dat catalog back to Logiqx XML.
///
/// Emits the XML declaration, the Logiqx DOCTYPE, the header envelope,
/// and one `<game>` element per node, so a projected catalog round-trips
/// with the same shape as its source document.
pub fn write_dat<W: Write>(dat: &DatFile, out: W) -> Result<(), DatError> {
    let mut writer = Writer::new_with_indent(out, b'\t', 1);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
    writer.write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))?;
    writer.write_event(Event::Start(BytesStart::new("datafile")))?;

    write_header(&mut writer, dat)?;
    for game in &dat.games {
        write_game(&mut writer, game)?;
    }

    writer.write_event(Event::End(BytesEnd::new("datafile")))?;
    Ok(())
}

fn write_header<W: Write>(writer: &mut Writer<W>, dat: &DatFile) -> Result<(), DatError> {
    writer.write_event(Event::Start(BytesStart::new("header")))?;

    write_text_element(writer, "name", &dat.header.name)?;
    write_text_element(writer, "description", &dat.header.description)?;
    write_text_element(writer, "version", &dat.header.version)?;
    if let Some(ref author) = dat.header.author {
        write_text_element(writer, "author", author)?;
    }
    if let Some(ref date) = dat.header.date {
        write_text_element(writer, "date", date)?;
    }
    if let Some(ref homepage) = dat.header.homepage {
        write_text_element(writer, "homepage", homepage)?;
    }
    if let Some(ref url) = dat.header.url {
        write_text_element(writer, "url", url)?;
    }

    writer.write_event(Event::End(BytesEnd::new("header")))?;
    Ok(())
}

fn write_game<W: Write>(writer: &mut Writer<W>, game: &DatGame) -> Result<(), DatError> {
    let mut start = BytesStart::new("game");
    start.push_attribute(("name", game.name.as_str()));
    if let Some(ref parent) = game.clone_of {
        start.push_attribute(("cloneof", parent.as_str()));
    }
    if game.is_bios {
        start.push_attribute(("isbios", "yes"));
    }
    writer.write_event(Event::Start(start))?;

    write_text_element(writer, "description", &game.description)?;
    if let Some(ref year) = game.year {
        write_text_element(writer, "year", year)?;
    }
    if let Some(ref manufacturer) = game.manufacturer {
        write_text_element(writer, "manufacturer", manufacturer)?;
    }

    for rom in &game.roms {
        let mut elem = BytesStart::new("rom");
        elem.push_attribute(("name", rom.name.as_str()));
        if let Some(ref size) = rom.size {
            elem.push_attribute(("size", size.as_str()));
        }
        if let Some(ref crc) = rom.crc {
            elem.push_attribute(("crc", crc.as_str()));
        }
        if let Some(ref sha1) = rom.sha1 {
            elem.push_attribute(("sha1", sha1.as_str()));
        }
        if let Some(ref md5) = rom.md5 {
            elem.push_attribute(("md5", md5.as_str()));
        }
        writer.write_event(Event::Empty(elem))?;
    }

    writer.write_event(Event::End(BytesEnd::new("game")))?;
    Ok(())
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &str,
) -> Result<(), DatError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
