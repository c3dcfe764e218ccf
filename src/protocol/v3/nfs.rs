// NFS Program Identity (Program 100003, Version 3)
//
// Program descriptor and procedure numbers from RFC 1813.

use std::fmt;

use super::rpc::RpcProgram;

pub const NFS_PROGRAM: u32 = 100003;
pub const NFS_V3: u32 = 3;

/// Highest NFS status that coincides with a system errno value.
/// Anything above it is reported as "operation not supported".
pub const NFS_STATUS_MAX: u32 = 32;

/// Program descriptor bound to every NFSv3 session
pub static NFS3_PROGRAM: RpcProgram = RpcProgram {
    prog_id: NFS_PROGRAM,
    prog_version: NFS_V3,
    prog_name: "NFSv3",
};

/// NFSv3 procedure numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum NfsProcedure {
    Null = 0,
    Getattr = 1,
    Setattr = 2,
    Lookup = 3,
    Access = 4,
    Readlink = 5,
    Read = 6,
    Write = 7,
    Create = 8,
    Mkdir = 9,
    Symlink = 10,
    Mknod = 11,
    Remove = 12,
    Rmdir = 13,
    Rename = 14,
    Link = 15,
    Readdir = 16,
    Readdirplus = 17,
    Fsstat = 18,
    Fsinfo = 19,
    Pathconf = 20,
    Commit = 21,
}

impl NfsProcedure {
    pub fn number(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            NfsProcedure::Null => "NULL",
            NfsProcedure::Getattr => "GETATTR",
            NfsProcedure::Setattr => "SETATTR",
            NfsProcedure::Lookup => "LOOKUP",
            NfsProcedure::Access => "ACCESS",
            NfsProcedure::Readlink => "READLINK",
            NfsProcedure::Read => "READ",
            NfsProcedure::Write => "WRITE",
            NfsProcedure::Create => "CREATE",
            NfsProcedure::Mkdir => "MKDIR",
            NfsProcedure::Symlink => "SYMLINK",
            NfsProcedure::Mknod => "MKNOD",
            NfsProcedure::Remove => "REMOVE",
            NfsProcedure::Rmdir => "RMDIR",
            NfsProcedure::Rename => "RENAME",
            NfsProcedure::Link => "LINK",
            NfsProcedure::Readdir => "READDIR",
            NfsProcedure::Readdirplus => "READDIRPLUS",
            NfsProcedure::Fsstat => "FSSTAT",
            NfsProcedure::Fsinfo => "FSINFO",
            NfsProcedure::Pathconf => "PATHCONF",
            NfsProcedure::Commit => "COMMIT",
        }
    }
}

impl TryFrom<u32> for NfsProcedure {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        let procedure = match value {
            0 => NfsProcedure::Null,
            1 => NfsProcedure::Getattr,
            2 => NfsProcedure::Setattr,
            3 => NfsProcedure::Lookup,
            4 => NfsProcedure::Access,
            5 => NfsProcedure::Readlink,
            6 => NfsProcedure::Read,
            7 => NfsProcedure::Write,
            8 => NfsProcedure::Create,
            9 => NfsProcedure::Mkdir,
            10 => NfsProcedure::Symlink,
            11 => NfsProcedure::Mknod,
            12 => NfsProcedure::Remove,
            13 => NfsProcedure::Rmdir,
            14 => NfsProcedure::Rename,
            15 => NfsProcedure::Link,
            16 => NfsProcedure::Readdir,
            17 => NfsProcedure::Readdirplus,
            18 => NfsProcedure::Fsstat,
            19 => NfsProcedure::Fsinfo,
            20 => NfsProcedure::Pathconf,
            21 => NfsProcedure::Commit,
            other => return Err(other),
        };
        Ok(procedure)
    }
}

impl fmt::Display for NfsProcedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_identity() {
        assert_eq!(NFS3_PROGRAM.prog_id, 100003);
        assert_eq!(NFS3_PROGRAM.prog_version, 3);
        assert_eq!(NFS3_PROGRAM.prog_name, "NFSv3");
    }

    #[test]
    fn test_procedure_numbers() {
        assert_eq!(NfsProcedure::Null.number(), 0);
        assert_eq!(NfsProcedure::Lookup.number(), 3);
        assert_eq!(NfsProcedure::Fsinfo.number(), 19);
        assert_eq!(NfsProcedure::Commit.number(), 21);
    }

    #[test]
    fn test_procedure_from_number() {
        for n in 0..=21 {
            let procedure = NfsProcedure::try_from(n).expect("known procedure");
            assert_eq!(procedure.number(), n);
        }
        assert_eq!(NfsProcedure::try_from(22), Err(22));
    }

    #[test]
    fn test_procedure_display() {
        assert_eq!(NfsProcedure::Getattr.to_string(), "GETATTR(1)");
    }
}
