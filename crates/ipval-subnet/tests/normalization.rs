//! End-to-end normalization corpus
//!
//! Runs every accepted notation and a pile of malformed inputs through the
//! public API and pins down the canonical base/mask each one normalizes to.

use ipval_subnet::Subnet;

const VALID_SUBNETS: [&str; 10] = [
    "10.0.0.0/8",
    "10.0.0.0/255.255.255.0",
    "10.0.*.*",
    "192.168.100.0/24",
    "192.168.0.0/255.255.255.252",
    "*.*.*.*",
    "1.2.3.4/32",
    "1.2.3.4/0",
    "10.0.0.0/0.0.0.0",
    "127.0.0.1",
];

const INVALID_SUBNETS: [&str; 16] = [
    "",
    "xtz",
    "example.com",
    "10.0.0.256/1",
    "10.0.0.0/255.255.1.0",
    "10.*.0.*",
    "192.168.100.0/33",
    "192.168.0.0/255.255.255.251",
    "*.*.*.0",
    "10.0.0.0/255.255.255.300",
    "127.x.*.*",
    "1.2.3.4/8/9",
    "1.2.3.4/",
    "10.0.0.0/+8",
    "1.2.3",
    "1.2.3.4.5",
];

#[test]
fn valid_subnets_parse() {
    for text in VALID_SUBNETS {
        assert!(Subnet::is_valid(text), "should accept {:?}", text);
        assert!(Subnet::parse(text).is_ok(), "should parse {:?}", text);
    }
}

#[test]
fn invalid_subnets_fail() {
    for text in INVALID_SUBNETS {
        assert!(!Subnet::is_valid(text), "should reject {:?}", text);
        assert!(Subnet::parse(text).is_err(), "should fail on {:?}", text);
    }
}

#[test]
fn normalized_base_and_mask() {
    let cases = [
        ("10.0.0.0/8", "10.0.0.0", "255.0.0.0"),
        ("192.168.0.0/255.255.255.0", "192.168.0.0", "255.255.255.0"),
        ("192.168.123.*", "192.168.123.0", "255.255.255.0"),
        ("172.12.*.*", "172.12.0.0", "255.255.0.0"),
        ("10.0.0.138", "10.0.0.138", "255.255.255.255"),
        ("192.168.10.10/26", "192.168.10.0", "255.255.255.192"),
    ];

    for (text, network, mask) in cases {
        let subnet = Subnet::parse(text).unwrap();
        assert_eq!(subnet.network().to_string(), network, "network of {:?}", text);
        assert_eq!(subnet.mask().to_string(), mask, "mask of {:?}", text);
        assert_eq!(subnet.to_string(), format!("{}/{}", network, mask));
    }
}

#[test]
fn range_membership() {
    let cases = [
        ("10.0.0.0/8", "10.0.1.2", true),
        ("10.0.0.0/8", "10.0.0.0", true),
        ("10.0.0.0/8", "11.0.0.0", false),
        ("10.0.0.0/8", "1.2.3.4", false),
        ("192.168.0.0/24", "192.168.0.2", true),
        ("192.168.0.0/24", "192.168.1.2", false),
        ("192.168.0.0/24", "192.168.0.255", true),
        ("192.168.0.0/25", "192.168.0.255", false),
        ("192.168.0.0/25", "192.168.0.127", true),
        ("192.168.0.0/25", "192.168.0.128", false),
        ("192.168.123.*", "192.168.123.0", true),
        ("192.168.123.*", "192.168.123.255", true),
        ("192.168.123.*", "192.168.122.1", false),
        ("10.0.0.138", "10.0.0.138", true),
        ("10.0.0.138", "10.0.0.139", false),
        ("10.0.0.138", "11.1.1.138", false),
        ("192.168.10.10/26", "192.168.10.0", true),
        ("192.168.10.10/26", "192.168.10.2", true),
        ("192.168.10.10/26", "192.168.10.63", true),
        ("192.168.10.10/26", "192.168.10.64", false),
        ("192.168.10.10/26", "192.168.11.251", false),
        ("192.168.1.0/255.255.255.252", "192.168.1.0", true),
        ("192.168.1.0/255.255.255.252", "192.168.1.1", true),
        ("192.168.1.0/255.255.255.252", "192.168.1.2", true),
        ("192.168.1.0/255.255.255.252", "192.168.1.3", true),
        ("192.168.1.0/255.255.255.252", "192.168.1.4", false),
        ("192.168.1.0/255.255.255.252", "192.168.1.5", false),
    ];

    for (subnet, addr, expected) in cases {
        let subnet = Subnet::parse(subnet).unwrap();
        let got = subnet.is_in_range(addr).unwrap();
        assert_eq!(got, expected, "{} in {}", addr, subnet);
    }
}

#[test]
fn json_round_trip() {
    for text in VALID_SUBNETS {
        let subnet = Subnet::parse(text).unwrap();
        let json = serde_json::to_string(&subnet).unwrap();
        let back: Subnet = serde_json::from_str(&json).unwrap();
        assert_eq!(subnet, back, "round trip of {:?}", text);
    }
}
