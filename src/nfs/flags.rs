// Mount -> session flag translation

use super::mount::MountFlags;
use crate::rpc::SessionFlags;

/// Mount flags that carry over to the RPC session, one entry per flag
pub const FLAG_TRANSLATION: [(MountFlags, SessionFlags); 4] = [
    (MountFlags::SOFT, SessionFlags::SOFT),
    (MountFlags::INT, SessionFlags::INT),
    (MountFlags::NOCONN, SessionFlags::NOCONN),
    (MountFlags::DUMBTIMR, SessionFlags::DUMBTIMR),
];

/// Session flags for a mount. Flags without an entry are dropped.
pub fn translate_flags(mount: MountFlags) -> SessionFlags {
    FLAG_TRANSLATION
        .iter()
        .filter(|(from, _)| mount.contains(*from))
        .fold(SessionFlags::empty(), |acc, (_, to)| acc | *to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_flag_independently() {
        for (from, to) in FLAG_TRANSLATION {
            assert_eq!(translate_flags(from), to);
        }
    }

    #[test]
    fn test_soft_and_interruptible_only() {
        let session = translate_flags(MountFlags::SOFT | MountFlags::INT);
        assert_eq!(session, SessionFlags::SOFT | SessionFlags::INT);
        assert!(!session.contains(SessionFlags::DUMBTIMR));
        assert!(!session.contains(SessionFlags::NOCONN));
    }

    #[test]
    fn test_unrelated_flags_ignored() {
        let mount = MountFlags::NFSV3 | MountFlags::RESVPORT | MountFlags::RDIRPLUS;
        assert!(translate_flags(mount).is_empty());

        let mixed = mount | MountFlags::DUMBTIMR;
        assert_eq!(translate_flags(mixed), SessionFlags::DUMBTIMR);
    }

    #[test]
    fn test_all_flags() {
        let mount = MountFlags::SOFT | MountFlags::INT | MountFlags::NOCONN | MountFlags::DUMBTIMR;
        let session = translate_flags(mount);
        assert_eq!(
            session,
            SessionFlags::SOFT | SessionFlags::INT | SessionFlags::NOCONN | SessionFlags::DUMBTIMR
        );
    }
}
