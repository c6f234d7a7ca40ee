use ipp_types::{
    generate,
    tag::{operation_name, GroupTag, ResolutionUnit},
    Message, Value,
};

#[test]
fn generators_validate_input() {
    assert!(generate::integer(5).is_ok());
    assert!(generate::integer(1 << 40).is_err());

    assert!(generate::keyword("one-sided").is_ok());
    assert!(generate::keyword("uné").is_err());

    assert!(generate::resolution(300, 300, ResolutionUnit::PerInch).is_ok());
    assert!(generate::resolution(-1, 300, ResolutionUnit::PerInch).is_err());

    assert_eq!(generate::range_of_integer(5, 1), generate::range_of_integer(1, 5));
}

#[test]
fn message_builds_a_derived_response() {
    let mut request = Message::new(0x000b, 42);
    request
        .group_mut(GroupTag::Operation)
        .push("printer-uri", vec![Value::Uri(
            "ipp://localhost/printers/example".try_into().unwrap(),
        )]);
    assert_eq!(request.operation_name(), Some("Get-Printer-Attributes"));

    let response = request.derive_successful_response();
    assert_eq!(response.id, request.id);
    assert_eq!(response.code, 0x0000);
    assert_eq!(response.operation_name(), None);
    assert_eq!(operation_name(0x000b), Some("Get-Printer-Attributes"));

    let op = response.group(GroupTag::Operation).unwrap();
    assert_eq!(
        op.get("attributes-charset").unwrap()[0],
        Value::Charset("utf-8".try_into().unwrap())
    );
}
