//! End-to-end tests for the DNS wire codec.
//!
//! These tests drive the public API only:
//! - query construction, serialization and padding
//! - parsing real responses, including EDNS0 options
//! - header bit packing across every flag, opcode and rcode value
//! - name decompression limits and malformed input

use std::net::Ipv4Addr;

use data_encoding::HEXLOWER_PERMISSIVE;

use dohwire_proto::class::{Class, RecordClass};
use dohwire_proto::edns::EdnsOption;
use dohwire_proto::header::{Header, HeaderFlags};
use dohwire_proto::rtype::{RecordType, Type};
use dohwire_proto::{
    create_query, parse_message, serialize_query, Error, ErrorKind, Message, Name, OpCode,
    ParseConfig, Question, Record, ResourceRecord, ResponseCode, SerializeConfig,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn hex(s: &str) -> Vec<u8> {
    let compact: String = s.split_whitespace().collect();
    HEXLOWER_PERMISSIVE.decode(compact.as_bytes()).unwrap()
}

fn name(s: &str) -> Name {
    Name::from_ascii(s).unwrap()
}

const CLOUDFLARE_RESPONSE: &str = "
    00 00 81 80 00 01 00 02 00 00 00 00
    0a 63 6c 6f 75 64 66 6c 61 72 65 03 63 6f 6d 00 00 01 00 01
    c0 0c 00 01 00 01 00 00 01 10 00 04 68 10 84 e5
    c0 0c 00 01 00 01 00 00 01 10 00 04 68 10 85 e5
";

// example.com A response with an OPT record carrying a cookie and an
// empty padding option, DO bit set, payload size 1232.
const EDNS_RESPONSE: &str = "
    ab cd 81 80 00 01 00 01 00 00 00 01
    07 65 78 61 6d 70 6c 65 03 63 6f 6d 00 00 01 00 01
    c0 0c 00 01 00 01 00 00 0e 10 00 04 5d b8 d8 22
    00 00 29 04 d0 00 00 80 00 00 10
    00 0a 00 08 01 02 03 04 05 06 07 08
    00 0c 00 00
";

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_cloudflare_response() {
    let wire = hex(CLOUDFLARE_RESPONSE);
    let msg = parse_message(&wire, 0).unwrap();

    assert!(msg.header.is_response());
    assert!(msg.header.recursion_desired());
    assert!(msg.header.recursion_available());
    assert_eq!(msg.header.rcode, ResponseCode::NoError);
    assert_eq!(msg.header.an_count, 2);

    let question = msg.question().unwrap();
    assert_eq!(question.qname.to_string(), "cloudflare.com");
    assert_eq!(question.qtype, Type::Known(RecordType::A));

    let addrs: Vec<_> = msg.a_records().collect();
    assert_eq!(
        addrs,
        vec![Ipv4Addr::new(104, 16, 132, 229), Ipv4Addr::new(104, 16, 133, 229)]
    );
    for answer in &msg.answers {
        assert_eq!(answer.name.to_string(), "cloudflare.com");
        assert_eq!(answer.ttl, 0x110);
        assert_eq!(answer.rclass, Class::Known(RecordClass::IN));
    }
    assert!(msg.opt().is_none());
}

#[test]
fn test_parse_edns_options_by_byte_length() {
    let wire = hex(EDNS_RESPONSE);
    let msg = Message::parse_with(&wire, 0, &ParseConfig::strict()).unwrap();

    assert_eq!(msg.id(), 0xABCD);
    assert_eq!(
        msg.answers[0].ipv4_addr(),
        Some(Ipv4Addr::new(93, 184, 216, 34))
    );

    let opt = msg.opt().unwrap();
    assert!(opt.name.is_root());
    assert_eq!(opt.max_payload_size, 1232);
    assert!(opt.dnssec_ok);
    assert_eq!(opt.version, 0);
    assert_eq!(opt.z, 0);
    assert_eq!(
        opt.options.as_slice(),
        &[EdnsOption::new(10, vec![1, 2, 3, 4, 5, 6, 7, 8])]
    );

    let config = ParseConfig {
        retain_padding: true,
        ..ParseConfig::default()
    };
    let msg = Message::parse_with(&wire, 0, &config).unwrap();
    let opt = msg.opt().unwrap();
    assert_eq!(opt.options.len(), 2);
    assert!(opt.options[1].is_padding());
    assert!(opt.options[1].data.is_empty());
}

#[test]
fn test_truncated_message() {
    let mut wire = hex(CLOUDFLARE_RESPONSE);
    wire.pop();

    let err = parse_message(&wire, 0).unwrap_err();
    assert!(matches!(err, Error::UnexpectedEof { .. }));
    assert_eq!(err.kind(), ErrorKind::Underflow);
    assert!(err.is_malformed());
}

#[test]
fn test_counts_trusted_on_parse() {
    // Header promises two questions, but the message ends after one.
    let mut wire = hex(CLOUDFLARE_RESPONSE);
    wire.truncate(32);
    wire[5] = 2;
    wire[7] = 0;

    assert!(matches!(
        parse_message(&wire, 0),
        Err(Error::UnexpectedEof { offset: 32, .. })
    ));
}

// ============================================================================
// Name decompression
// ============================================================================

#[test]
fn test_pointer_only_question_name() {
    // Header, question "example.com" at 12, second question is a bare pointer.
    let wire = hex(
        "
        00 01 00 00 00 02 00 00 00 00 00 00
        07 65 78 61 6d 70 6c 65 03 63 6f 6d 00 00 01 00 01
        c0 0c 00 1c 00 01
    ",
    );
    let msg = parse_message(&wire, 0).unwrap();

    let labels: Vec<_> = msg.questions[1]
        .qname
        .labels()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(labels, vec!["example", "com"]);
    assert_eq!(msg.questions[1].qtype, Type::Known(RecordType::AAAA));
}

#[test]
fn test_pointer_cycle_rejected() {
    let wire = hex("00 01 00 00 00 01 00 00 00 00 00 00 c0 0c 00 01 00 01");
    let err = parse_message(&wire, 0).unwrap_err();

    assert_eq!(err, Error::TooManyCompressionJumps { max_depth: 20 });
    assert_eq!(err.kind(), ErrorKind::Malformed);
}

#[test]
fn test_extended_label_type_rejected() {
    let wire = hex("00 01 00 00 00 01 00 00 00 00 00 00 41 00 00 01 00 01");
    let err = parse_message(&wire, 0).unwrap_err();

    assert_eq!(
        err,
        Error::UnsupportedLabelType {
            offset: 12,
            label_type: 0b01
        }
    );
    assert_eq!(err.kind(), ErrorKind::Unsupported);
}

// ============================================================================
// Query construction and serialization
// ============================================================================

#[test]
fn test_create_query() {
    let query = create_query([Question::new_generic(
        name("example.com"),
        Type::from_u16(1),
        Class::from_u16(1),
    )]);

    assert_eq!(query.header.qd_count, 1);
    assert_eq!(query.header.ar_count, 1);
    assert_eq!(query.additional.len(), 1);

    let opt = query.opt().unwrap();
    assert_eq!(opt.max_payload_size, 0xFFFF);
    assert!(!opt.dnssec_ok);
}

#[test]
fn test_query_roundtrip() {
    let mut query = create_query([
        Question::a(name("example.com")),
        Question::new(name("www.example.org"), RecordType::HTTPS, RecordClass::IN),
        Question::new_generic(name("version.bind"), Type::Unknown(65_280), Class::from_u16(3)),
    ]);
    query.header.id = 0xBEEF;
    query.header.opcode = OpCode::Status;
    {
        let opt = query.opt_mut().unwrap();
        opt.dnssec_ok = true;
        opt.version = 1;
        opt.extended_rcode = 7;
        opt.z = 0x0123;
        opt.max_payload_size = 1232;
    }

    let wire = serialize_query(&query).unwrap();
    let parsed = Message::parse_with(&wire, 0, &ParseConfig::strict()).unwrap();
    assert_eq!(parsed, query);
}

#[test]
fn test_padding_length_property() {
    for len in 1..=120 {
        let label = "a".repeat(len.min(63));
        let qname = if len > 63 {
            format!("{label}.{}", "b".repeat(len - 63))
        } else {
            label
        };
        let query = create_query([Question::aaaa(name(&qname))]);

        let unpadded = query
            .serialize_query_with(&SerializeConfig::unpadded())
            .unwrap()
            .len();
        let padded = serialize_query(&query).unwrap().len();

        assert_eq!(padded % 128, 0, "name length {len}");
        assert!(padded >= unpadded + 4);
        assert!(padded - 128 < unpadded + 4);
    }
}

#[test]
fn test_padding_is_random() {
    let query = create_query([Question::a(name("example.com"))]);
    let wires: Vec<_> = (0..4).map(|_| serialize_query(&query).unwrap()).collect();

    // 12 header + 17 question + 11 OPT + 4 option header, then 84 padding bytes.
    let first = &wires[0];
    assert_eq!(first.len(), 128);
    for wire in &wires[1..] {
        assert_eq!(wire.len(), first.len());
        assert_eq!(wire[..44], first[..44]);
    }

    let paddings: Vec<_> = wires.iter().map(|wire| &wire[44..]).collect();
    assert!(paddings.iter().any(|padding| padding.iter().any(|&b| b != 0)));
    assert!(paddings[1..].iter().any(|padding| *padding != paddings[0]));
}

#[test]
fn test_padding_lands_in_opt_after_other_records() {
    let mut query = create_query([Question::a(name("example.com"))]);
    let glue = ResourceRecord::new(
        name("ns1.example.com"),
        RecordType::A,
        RecordClass::IN,
        300,
        [192, 0, 2, 53],
    );
    query.additional.insert(0, Record::Resource(glue));
    query.header.ar_count = 2;

    let wire = serialize_query(&query).unwrap();
    assert_eq!(wire.len() % 128, 0);

    let parsed = Message::parse_with(&wire, 0, &ParseConfig::strict()).unwrap();
    assert_eq!(parsed, query);
    assert!(parsed.additional[0].as_resource().is_some());
    assert!(parsed.additional[1].as_opt().is_some());

    let retained = ParseConfig {
        retain_padding: true,
        ..ParseConfig::strict()
    };
    let parsed = Message::parse_with(&wire, 0, &retained).unwrap();
    let opt = parsed.opt().unwrap();
    assert_eq!(opt.options.len(), 1);
    assert!(opt.options[0].is_padding());
    assert_eq!(opt.wire_len(), wire.len() - (12 + 17 + 31));
}

#[test]
fn test_label_validation() {
    assert!(Name::from_ascii(&"a".repeat(63)).is_ok());
    for bad in [
        "a".repeat(64),
        "-start.com".to_owned(),
        "end-.com".to_owned(),
        "UPPER.com".to_owned(),
        "under_score.com".to_owned(),
        "sp ace.com".to_owned(),
    ] {
        let err = Name::from_ascii(&bad).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{bad}");
    }
    // Empty labels vanish rather than fail.
    assert_eq!(name("a..b.").label_count(), 2);
}

// ============================================================================
// Header bit packing
// ============================================================================

#[test]
fn test_header_bits_roundtrip_through_messages() {
    let bits = [
        HeaderFlags::QR,
        HeaderFlags::AA,
        HeaderFlags::TC,
        HeaderFlags::RD,
        HeaderFlags::RA,
    ];
    let config = SerializeConfig::unpadded();

    for mask in 0u8..32 {
        let flags = bits
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << *i) != 0)
            .fold(HeaderFlags::empty(), |acc, (_, bit)| acc | *bit);

        for opcode in 0..16 {
            for rcode in 0..16 {
                let header = Header {
                    flags,
                    opcode: OpCode::from_u8(opcode),
                    rcode: ResponseCode::from_u8(rcode),
                    ..Header::new(0x5A5A)
                };
                let msg = Message::new(header.clone());

                let wire = msg.serialize_query_with(&config).unwrap();
                assert_eq!(wire.len(), 12);
                assert_eq!(Message::parse(&wire).unwrap().header, header);
            }
        }
    }
}
