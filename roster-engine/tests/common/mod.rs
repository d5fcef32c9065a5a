//! Shared fixtures for roster-engine integration tests

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Three-record roster used across the scenario tests
pub const SCENARIO_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<University>
    <Student Faculty="Eng" Department="CS">
        <Name>A</Name>
        <Age>20</Age>
    </Student>
    <Student Faculty="Eng" Department="EE">
        <Name>B</Name>
    </Student>
    <Student Faculty="Sci" Department="CS">
        <Name>C</Name>
    </Student>
</University>"#;

/// Roster exercising missing attributes, missing and empty names
pub const EDGE_XML: &str = r#"<University>
    <Student Faculty="CS"><Age>20</Age></Student>
    <Student Faculty="CS"><Name/></Student>
    <Student Department="Math"><Name>NoFaculty</Name></Student>
    <Student Faculty="cs" Department="Math"><Name>Lower</Name></Student>
    <Student Faculty="" Department=""><Name>Blank</Name></Student>
    <Student Faculty="CS" Department="Math"><Name>  Spaced &amp; Escaped  </Name></Student>
    <Group><Student Faculty="CS"><Name>Nested</Name></Student></Group>
    <Student Faculty="O'Neil"><Name><![CDATA[Quote]]></Name></Student>
</University>"#;

/// Roster saved with Windows line endings, plus a lone carriage return
pub const CRLF_XML: &str = "<University>\r\n\
    <Student Faculty=\"Eng\" Department=\"CS\">\r\n\
        <Name>Line\r\nBreak</Name>\r\n\
    </Student>\r\n\
    <Student Faculty=\"Sci\" Department=\"EE\"><Name>Lone\rCR</Name></Student>\r\n\
    <Student Faculty=\"Eng\"><Name><![CDATA[Data\r\nBlock]]></Name></Student>\r\n\
</University>\r\n";

/// Attribute values with literal and referenced tabs and line breaks
pub const WHITESPACE_ATTR_XML: &str = "<University>\n\
    <Student Faculty=\"E\nng\" Department=\"C\tS\"><Name>A</Name></Student>\n\
    <Student Faculty=\"E&#10;ng\" Department=\"C&#9;S\"><Name>B</Name></Student>\n\
    <Student Faculty=\"E ng\" Department=\"C S\"><Name>C</Name></Student>\n\
    <Student Faculty=\"E\r\nng\" Department=\"C\r\nS\"><Name>D</Name></Student>\n\
</University>";

/// Prolog, comments, processing instructions and character references
pub const PROLOG_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<!-- roster export -->
<?roster-tool version="2"?>
<University>
    <Student Faculty="Eng" Department="CS"><Name>Al<!-- nick -->ice<?mark?></Name></Student>
    <Student Faculty="&#69;ng" Department="&#x43;S"><Name>B&#111;b &lt;&#x61;&gt;</Name></Student>
    <Student Faculty="Sci"><Name>Car&#13;ol</Name></Student>
</University>
<!-- trailing -->
<?done?>
"#;

/// Every well-formed roster above
pub const ALL_XML: [&str; 5] = [SCENARIO_XML, EDGE_XML, CRLF_XML, WHITESPACE_ATTR_XML, PROLOG_XML];

/// A roster document written to a temporary directory
pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
}

pub fn write_fixture(xml: &str) -> Fixture {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("students.xml");
    fs::write(&path, xml).unwrap();
    Fixture { _dir: dir, path }
}

pub fn write_fixture_bytes(bytes: &[u8]) -> Fixture {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("students.xml");
    fs::write(&path, bytes).unwrap();
    Fixture { _dir: dir, path }
}
