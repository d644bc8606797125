bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClassAccessFlag: u16 {
        const PUBLIC = 0x0001;
        const FINAL = 0x0010;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldAccessFlag: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED	 = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const VOLATILE = 0x0040;
        const TRANSIENT = 0x0080;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MethodAccessFlag: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED	 = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const NATIVE = 0x0100;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
    }
}

/// Source keywords in canonical declaration order, paired with the raw flag
/// bit they stand for. Flag types share bit values, so one table serves all.
const KEYWORD_ORDER: &[(u16, &str)] = &[
    (0x0001, "public"),
    (0x0004, "protected"),
    (0x0002, "private"),
    (0x0400, "abstract"),
    (0x0008, "static"),
    (0x0010, "final"),
    (0x0080, "transient"),
    (0x0040, "volatile"),
    (0x0020, "synchronized"),
    (0x0100, "native"),
    (0x0800, "strictfp"),
];

fn keywords_of(bits: u16) -> String {
    KEYWORD_ORDER
        .iter()
        .filter(|(bit, _)| bits & bit != 0)
        .map(|(_, keyword)| *keyword)
        .collect::<Vec<_>>()
        .join(" ")
}

impl ClassAccessFlag {
    /// Keywords preceding `class`/`interface`. `INTERFACE` itself is rendered
    /// by the caller, and interfaces drop their implicit `abstract`.
    pub fn keywords(&self) -> String {
        let mut flags = *self;
        if flags.contains(ClassAccessFlag::INTERFACE) {
            flags.remove(ClassAccessFlag::INTERFACE | ClassAccessFlag::ABSTRACT);
        }
        keywords_of(flags.bits())
    }
}

impl FieldAccessFlag {
    pub fn keywords(&self) -> String {
        keywords_of(self.bits())
    }
}

impl MethodAccessFlag {
    pub fn keywords(&self) -> String {
        keywords_of(self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_keywords() {
        let flags = ClassAccessFlag::PUBLIC | ClassAccessFlag::ABSTRACT;
        assert_eq!(flags.keywords(), "public abstract");
        assert_eq!(ClassAccessFlag::empty().keywords(), "");
    }

    #[test]
    fn test_interface_drops_abstract() {
        let flags = ClassAccessFlag::PUBLIC | ClassAccessFlag::INTERFACE | ClassAccessFlag::ABSTRACT;
        assert_eq!(flags.keywords(), "public");
    }

    #[test]
    fn test_member_keyword_order() {
        let field = FieldAccessFlag::FINAL | FieldAccessFlag::STATIC | FieldAccessFlag::PUBLIC;
        assert_eq!(field.keywords(), "public static final");

        let method = MethodAccessFlag::ABSTRACT | MethodAccessFlag::PROTECTED;
        assert_eq!(method.keywords(), "protected abstract");
    }
}
