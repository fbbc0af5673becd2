//! Subnet normalization example
//!
//! Run with: cargo run --example subnet_info

use ipval_subnet::Subnet;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("ipval - Subnet Normalization Example\n");

    let notations = [
        "192.168.10.10/26",
        "10.0.0.0/255.0.0.0",
        "192.168.123.*",
        "10.0.0.138",
    ];

    for notation in notations {
        let subnet = Subnet::parse(notation)?;

        println!("Input: {}", notation);
        println!("─────────────────────────────");
        println!("Canonical: {}", subnet);
        println!("Network:   {}", subnet.network());
        println!("Mask:      {} (/{})", subnet.mask(), subnet.prefix_len());
        println!("Broadcast: {}", subnet.broadcast());
        println!();
    }

    let subnet = Subnet::parse("192.168.1.0/24")?;
    println!("Checking range membership against {}:", subnet);
    println!("192.168.1.100 in range? {}", subnet.is_in_range("192.168.1.100")?);
    println!("192.168.2.1 in range?   {}", subnet.is_in_range("192.168.2.1")?);

    Ok(())
}
