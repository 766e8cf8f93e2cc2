//! Presentation of parsed messages.
//!
//! The JSON view uses camelCase keys and renders RDATA by type: A records
//! as dotted quads, AAAA records as IPv6 text and everything else as
//! lowercase hex.

use data_encoding::HEXLOWER;
use dohwire_proto::{EdnsOption, Message, OptRecord, Record, ResourceRecord};
use serde::Serialize;

/// JSON view of a message.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    id: u16,
    response: bool,
    opcode: String,
    authoritative_answer: bool,
    truncated: bool,
    recursion_desired: bool,
    recursion_available: bool,
    z: u8,
    response_code: String,
    questions: Vec<QuestionView>,
    answers: Vec<RecordView>,
    authority_records: Vec<RecordView>,
    additional_records: Vec<AdditionalView>,
}

#[derive(Debug, Serialize)]
struct QuestionView {
    name: String,
    #[serde(rename = "type")]
    qtype: String,
    class: String,
}

#[derive(Debug, Serialize)]
struct RecordView {
    name: String,
    #[serde(rename = "type")]
    rtype: String,
    class: String,
    ttl: u32,
    value: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum AdditionalView {
    Opt(OptView),
    Record(RecordView),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OptView {
    name: String,
    #[serde(rename = "type")]
    rtype: &'static str,
    max_payload_size: u16,
    extended_rcode: u8,
    version: u8,
    #[serde(rename = "do")]
    dnssec_ok: bool,
    z: u16,
    options: Vec<OptionView>,
}

#[derive(Debug, Serialize)]
struct OptionView {
    code: u16,
    data: String,
}

/// Renders record data according to its type.
pub fn format_rdata(record: &ResourceRecord) -> String {
    if let Some(addr) = record.ipv4_addr() {
        addr.to_string()
    } else if let Some(addr) = record.ipv6_addr() {
        addr.to_string()
    } else {
        HEXLOWER.encode(&record.rdata)
    }
}

impl From<&ResourceRecord> for RecordView {
    fn from(rr: &ResourceRecord) -> Self {
        Self {
            name: rr.name.to_string(),
            rtype: rr.rtype.to_string(),
            class: rr.rclass.to_string(),
            ttl: rr.ttl,
            value: format_rdata(rr),
        }
    }
}

impl From<&EdnsOption> for OptionView {
    fn from(option: &EdnsOption) -> Self {
        Self {
            code: option.code,
            data: HEXLOWER.encode(&option.data),
        }
    }
}

impl From<&OptRecord> for OptView {
    fn from(opt: &OptRecord) -> Self {
        Self {
            name: opt.name.to_string(),
            rtype: "OPT",
            max_payload_size: opt.max_payload_size,
            extended_rcode: opt.extended_rcode,
            version: opt.version,
            dnssec_ok: opt.dnssec_ok,
            z: opt.z,
            options: opt.options.iter().map(OptionView::from).collect(),
        }
    }
}

impl From<&Message> for MessageView {
    fn from(msg: &Message) -> Self {
        let header = &msg.header;
        Self {
            id: header.id,
            response: header.is_response(),
            opcode: header.opcode.to_string(),
            authoritative_answer: header.is_authoritative(),
            truncated: header.is_truncated(),
            recursion_desired: header.recursion_desired(),
            recursion_available: header.recursion_available(),
            z: header.z,
            response_code: header.rcode.to_string(),
            questions: msg
                .questions
                .iter()
                .map(|q| QuestionView {
                    name: q.qname.to_string(),
                    qtype: q.qtype.to_string(),
                    class: q.qclass.to_string(),
                })
                .collect(),
            answers: msg.answers.iter().map(RecordView::from).collect(),
            authority_records: msg.authority.iter().map(RecordView::from).collect(),
            additional_records: msg
                .additional
                .iter()
                .map(|record| match record {
                    Record::Opt(opt) => AdditionalView::Opt(opt.into()),
                    Record::Resource(rr) => AdditionalView::Record(rr.into()),
                })
                .collect(),
        }
    }
}

/// Renders a message as pretty-printed JSON.
pub fn to_json(msg: &Message) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&MessageView::from(msg))
}

/// Renders a message in a dig-like text layout.
pub fn to_text(msg: &Message) -> String {
    msg.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dohwire_proto::{create_query, Name, Question, RecordClass, RecordType};
    use serde_json::Value;

    fn response() -> Message {
        let name = Name::from_ascii("example.com").unwrap();
        let mut msg = create_query([Question::a(name.clone())]);
        msg.header.set_response(true);
        msg.answers.push(ResourceRecord::new(
            name.clone(),
            RecordType::A,
            RecordClass::IN,
            272,
            [104, 16, 132, 229],
        ));
        msg.answers.push(ResourceRecord::new(
            name.clone(),
            RecordType::AAAA,
            RecordClass::IN,
            272,
            [0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
        ));
        msg.answers.push(ResourceRecord::new(
            name,
            RecordType::TXT,
            RecordClass::IN,
            60,
            *b"\x02hi",
        ));
        msg
    }

    #[test]
    fn test_json_view() {
        let json: Value = serde_json::from_str(&to_json(&response()).unwrap()).unwrap();

        assert_eq!(json["id"], 0);
        assert_eq!(json["response"], true);
        assert_eq!(json["responseCode"], "NOERROR");
        assert_eq!(json["questions"][0]["name"], "example.com");
        assert_eq!(json["questions"][0]["type"], "A");

        let answers = json["answers"].as_array().unwrap();
        assert_eq!(answers[0]["value"], "104.16.132.229");
        assert_eq!(answers[0]["ttl"], 272);
        assert_eq!(answers[1]["value"], "2001:db8::1");
        assert_eq!(answers[2]["value"], "026869");

        let opt = &json["additionalRecords"][0];
        assert_eq!(opt["type"], "OPT");
        assert_eq!(opt["maxPayloadSize"], 65535);
        assert_eq!(opt["do"], false);
        assert_eq!(opt["options"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_text_view() {
        let text = to_text(&response());
        assert!(text.contains(";; ANSWER SECTION:"));
        assert!(text.contains("104.16.132.229"));
        assert!(text.contains("2001:db8::1"));
    }
}
