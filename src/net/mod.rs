//! 网络模拟模块
//!
//! 上游接入路由器、数据包、下游 NIC、Worker 边界与主机注册表。

// 子模块声明
mod arrive_packet;
mod id;
mod interface;
mod net_world;
mod network;
mod packet;
mod pull_packets;
mod router;
mod stats;
mod worker;

// 重新导出公共接口
pub use arrive_packet::ArrivePacket;
pub use id::HostId;
pub use interface::{NetworkInterface, Nic};
pub use net_world::NetWorld;
pub use network::Network;
pub use packet::{DeliveryStatus, Packet, PacketRef};
pub use pull_packets::PullPackets;
pub use router::{Router, RouterRef};
pub use stats::{DeliveryReport, Stats};
pub use worker::Worker;
