//! `wakeup`: send the wake-up datagram to a console in standby.
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tokio::net::UdpSocket;

use super::{
    protocol::{credential_from_regist_key, wakeup_packet, ConsoleFamily},
    CommandLog,
};
use crate::cli::parse_error_exit_code;

#[derive(Debug, Parser)]
#[command(name = "wakeup", about = "Wake a registered console from standby")]
struct WakeupArgs {
    /// Address of the console.
    #[arg(long)]
    host: IpAddr,
    /// Registration key of the console, as printed during registration.
    #[arg(long = "registkey", value_name = "REGISTKEY")]
    regist_key: String,
    /// Target a PS5 instead of a PS4.
    #[arg(long, default_value_t = false)]
    ps5: bool,
}

pub fn run(log: &CommandLog, argv: &[String]) -> i32 {
    let args = match WakeupArgs::try_parse_from(argv) {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return parse_error_exit_code(&err);
        }
    };

    match wakeup(log, &args) {
        Ok(target) => {
            log.info(format!("wake-up datagram sent to {target}"));
            0
        }
        Err(err) => {
            log.error(format!("{err:#}"));
            eprintln!("{err:#}");
            1
        }
    }
}

fn wakeup(log: &CommandLog, args: &WakeupArgs) -> Result<SocketAddr> {
    let credential = credential_from_regist_key(&args.regist_key)
        .ok_or_else(|| anyhow!("registration key `{}` is not hexadecimal", args.regist_key))?;
    let family = ConsoleFamily::from_ps5_flag(args.ps5);
    let target = SocketAddr::new(args.host, family.port());
    let packet = wakeup_packet(family, credential);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start wake-up runtime")?;
    runtime.block_on(async {
        let bind_addr: SocketAddr = if target.is_ipv6() {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(bind_addr)
            .await
            .with_context(|| format!("failed to bind wake-up socket ({bind_addr})"))?;
        socket
            .set_broadcast(true)
            .context("failed to enable broadcast on wake-up socket")?;
        socket
            .send_to(packet.as_bytes(), target)
            .await
            .with_context(|| format!("failed to send wake-up datagram to {target}"))?;
        log.verbose(format!("sent wake-up datagram to {target}"));
        Ok::<_, anyhow::Error>(target)
    })
}
