use std::io::Read;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::{from_bytes, from_bytes_unnamed, from_reader, to_bytes, to_bytes_unnamed, to_writer};
use crate::{Compound, List, Tag, Value};

fn kitchen_sink() -> Compound {
    let mut nested = Compound::new();
    nested.insert("flag", true);
    nested.insert("empty string", "");

    let mut list_of_compounds = List::new(Tag::Compound).unwrap();
    list_of_compounds.push(nested.clone()).unwrap();
    list_of_compounds.push(Compound::new()).unwrap();

    let mut list_of_lists = List::new(Tag::List).unwrap();
    list_of_lists
        .push(List::try_from(vec![Value::Int(1), Value::Int(2)]).unwrap())
        .unwrap();
    list_of_lists.push(List::default()).unwrap();

    let mut root = Compound::new();
    root.insert("byte", i8::MIN);
    root.insert("short", i16::MAX);
    root.insert("int", 0x12345678i32);
    root.insert("long", i64::MIN);
    root.insert("float", 1.5f32);
    root.insert("double", -0.001f64);
    root.insert("string", "HELLO WORLD THIS IS A TEST STRING ÅÄÖ!");
    root.insert("nul and astral", "a\0\u{1d11e}b");
    root.insert("byte array", vec![i8::MIN, 0, i8::MAX]);
    root.insert("int array", vec![i32::MIN, 0, i32::MAX]);
    root.insert("long array", vec![i64::MIN, 0, i64::MAX]);
    root.insert("empty byte array", Vec::<i8>::new());
    root.insert("empty int array", Vec::<i32>::new());
    root.insert("empty long array", Vec::<i64>::new());
    root.insert("empty end list", List::default());
    root.insert("empty typed list", List::new(Tag::Long).unwrap());
    root.insert("list of compounds", list_of_compounds);
    root.insert("list of lists", list_of_lists);
    root.insert("compound", nested);
    root
}

#[test]
fn every_variant_roundtrips() {
    let root = Value::Compound(kitchen_sink());

    let bytes = to_bytes("everything", &root).unwrap();
    let (name, decoded) = from_bytes(&bytes).unwrap();

    assert_eq!(name, "everything");
    assert_eq!(decoded, root);
}

#[test]
fn unnamed_root_roundtrips() {
    let root = Value::Compound(kitchen_sink());

    let bytes = to_bytes_unnamed(&root).unwrap();
    let decoded = from_bytes_unnamed(&bytes).unwrap();

    assert_eq!(decoded, root);
}

#[test]
fn primitive_roots_roundtrip() {
    let values = [
        Value::Byte(-1),
        Value::Double(f64::MIN_POSITIVE),
        Value::String(String::new()),
        Value::IntArray(vec![7; 100]),
    ];
    for value in values {
        let bytes = to_bytes("root", &value).unwrap();
        assert_eq!(from_bytes(&bytes).unwrap(), ("root".to_owned(), value));
    }
}

// Compression is the caller's job: the codec sees only plain bytes. This is
// the typical shape of reading/writing an NBT file on disk.
#[test]
fn gzip_level_scenario() {
    let mut level = Compound::new();
    level.insert("intTest", 2147483647i32);
    level.insert("stringTest", "HELLO WORLD THIS IS A TEST STRING ÅÄÖ!");

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    to_writer(&mut encoder, "Level", &Value::Compound(level)).unwrap();
    let compressed = encoder.finish().unwrap();

    let (name, root) = from_reader(GzDecoder::new(compressed.as_slice())).unwrap();

    assert_eq!(name, "Level");
    let root = root.as_compound().unwrap();
    assert_eq!(root.int("intTest"), Some(2147483647));
    assert_eq!(
        root.string("stringTest"),
        Some("HELLO WORLD THIS IS A TEST STRING ÅÄÖ!")
    );
}

// Same bytes whether the stream is consumed in one go or byte by byte, and
// the reader never reads past its own tag.
#[test]
fn roundtrip_through_io_traits() {
    let root = Value::Compound(kitchen_sink());
    let direct = to_bytes("t", &root).unwrap();

    let mut via_writer = Vec::new();
    to_writer(&mut via_writer, "t", &root).unwrap();
    assert_eq!(direct, via_writer);

    let decoded = from_reader(OneByteAtATime(&direct)).unwrap();
    assert_eq!(decoded, ("t".to_owned(), root));
}

/// Reader that returns a single byte per call, to exercise `read_exact`
/// paths across fragmented reads.
struct OneByteAtATime<'a>(&'a [u8]);

impl Read for OneByteAtATime<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.0.is_empty() || buf.is_empty() {
            return Ok(0);
        }
        buf[0] = self.0[0];
        self.0 = &self.0[1..];
        Ok(1)
    }
}
