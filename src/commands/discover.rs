//! `discover`: broadcast a search datagram and print every console that answers.
use std::{
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::{
    net::UdpSocket,
    time::{self, Instant},
};

use super::{
    protocol::{parse_reply, search_packet, ConsoleFamily, DiscoveryReply},
    CommandLog,
};
use crate::cli::parse_error_exit_code;

const REPLY_BUFFER_LEN: usize = 2048;
/// Upper bound for `--timeout`, in seconds.
const MAX_TIMEOUT_SECS: u64 = 3600;

#[derive(Debug, Parser)]
#[command(name = "discover", about = "Search the local network for consoles")]
struct DiscoverArgs {
    /// Address to query; the broadcast address reaches every console on the LAN.
    #[arg(long, default_value = "255.255.255.255")]
    host: IpAddr,
    /// Seconds to wait for replies (at most one hour).
    #[arg(
        long,
        default_value_t = 2,
        value_parser = clap::value_parser!(u64).range(0..=MAX_TIMEOUT_SECS)
    )]
    timeout: u64,
    /// Search for PS5 consoles instead of PS4.
    #[arg(long, default_value_t = false)]
    ps5: bool,
    /// Log every datagram received.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

pub fn run(log: &CommandLog, argv: &[String]) -> i32 {
    let args = match DiscoverArgs::try_parse_from(argv) {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return parse_error_exit_code(&err);
        }
    };
    let log = log.clone().with_verbose(args.verbose || log.is_verbose());

    match discover(&log, &args) {
        Ok(replies) => {
            for (peer, reply) in &replies {
                print!("{reply}");
                println!("  address: {}", peer.ip());
            }
            log.info(format!("{} console(s) answered", replies.len()));
            0
        }
        Err(err) => {
            log.error(format!("{err:#}"));
            eprintln!("{err:#}");
            1
        }
    }
}

fn discover(log: &CommandLog, args: &DiscoverArgs) -> Result<Vec<(SocketAddr, DiscoveryReply)>> {
    let family = ConsoleFamily::from_ps5_flag(args.ps5);
    let target = SocketAddr::new(args.host, family.port());
    let window = Duration::from_secs(args.timeout);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start discovery runtime")?;
    runtime.block_on(collect_replies(log, target, family, window))
}

async fn collect_replies(
    log: &CommandLog,
    target: SocketAddr,
    family: ConsoleFamily,
    window: Duration,
) -> Result<Vec<(SocketAddr, DiscoveryReply)>> {
    let bind_addr: SocketAddr = if target.is_ipv6() {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    };
    let socket = UdpSocket::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind discovery socket ({bind_addr})"))?;
    socket
        .set_broadcast(true)
        .context("failed to enable broadcast on discovery socket")?;

    socket
        .send_to(search_packet(family).as_bytes(), target)
        .await
        .with_context(|| format!("failed to send search datagram to {target}"))?;
    log.verbose(format!("sent search datagram to {target}"));

    let deadline = Instant::now() + window;
    let mut buffer = [0u8; REPLY_BUFFER_LEN];
    let mut replies = Vec::new();
    loop {
        let received = match time::timeout_at(deadline, socket.recv_from(&mut buffer)).await {
            Err(_elapsed) => break,
            Ok(result) => result.context("failed to receive discovery reply")?,
        };
        let (len, peer) = received;
        let datagram = String::from_utf8_lossy(&buffer[..len]);
        match parse_reply(&datagram) {
            Some(reply) => {
                log.verbose(format!("reply from {peer}: {:?}", reply.state));
                replies.push((peer, reply));
            }
            None => log.verbose(format!("ignored datagram from {peer}")),
        }
    }

    Ok(replies)
}
