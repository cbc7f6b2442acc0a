/// Declares a closed AST: one enum named `$name` with a variant per node,
/// one plain struct per node, and `From<Node>` for the enum so parser code
/// can write `Grouping { expression }.into()`.
macro_rules! generate_ast {
    ($name:ident, [$($typename:ident => { $($propname:ident: $proptype:ty),+ };)+]) => {
        #[derive(Debug, PartialEq, Clone)]
        pub enum $name {
            $($typename($typename)),+
        }

        $(
            #[derive(Debug, PartialEq, Clone)]
            pub struct $typename {
                $(pub(crate) $propname: $proptype),+
            }

            impl From<$typename> for $name {
                fn from(node: $typename) -> Self {
                    $name::$typename(node)
                }
            }
        )+
    };
}
