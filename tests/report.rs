use addrspec_lib::{Options, TldList, validate};

fn render(email: &str, options: &Options) -> String {
    validate(email, options)
        .diagnoses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn comment_and_colon_end() {
    insta::assert_snapshot!(render("test.(c)x@[IPv6:1::2:]", &Options::default()), @r"
    deprecatedComment (37) at 5
    rfc5322IPv6ColonEnd (77) at 21
    ");
}

#[test]
fn doubled_crlf_after_domain() {
    insta::assert_snapshot!(render("test@iana.org \r\n\r\n", &Options::default()), @r"
    cfwsFWS (18) at 13
    errFWSCRLFx2 (148) at 15
    errFWSCRLFEnd (149) at 16
    errATEXTAfterCFWS (133) at 17
    errExpectingATEXT (137) at 17
    ");
}

#[test]
fn option_checks_have_no_offset() {
    let options = Options {
        allow_unicode: false,
        tld_whitelist: Some(TldList::from("com")),
        ..Options::default()
    };
    insta::assert_snapshot!(render("ü@top", &options), @r"
    undesiredNonAscii (25) at 0
    errUnknownTLD (160)
    ");
}

#[test]
fn clean_address_reports_nothing() {
    insta::assert_snapshot!(render("first.last@example.com", &Options::default()), @"");
}
