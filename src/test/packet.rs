use crate::net::{ACK_BYTES, Packet, PacketKind};

#[test]
fn data_and_ack_constructors() {
    let d = Packet::data(7, 10);
    assert_eq!(d.kind, PacketKind::Data);
    assert_eq!(d.sn, 7);
    assert_eq!(d.size_bytes, 10);
    assert!(d.is_data());

    let a = Packet::ack(7);
    assert_eq!(a.kind, PacketKind::Ack);
    assert_eq!(a.sn, 7);
    assert_eq!(a.size_bytes, ACK_BYTES);
    assert!(!a.is_data());
}

#[test]
fn packet_display_names_kind_and_sn() {
    assert_eq!(Packet::data(3, 10).to_string(), "DATA(SN=3, 10B)");
    assert_eq!(Packet::ack(3).to_string(), "ACK(SN=3)");
}
