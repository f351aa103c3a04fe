use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use proc_macro2::Span;
use toml_edit::{Document, Item, Table};

const FACADE_NAME: &str = "mold";
const CRATE_PREFIX: &str = "mold_";

/// The parsed `Cargo.toml` of the crate that invokes a proc-macro.
///
/// Generated code must name `mold_shape` with a path that is valid from the
/// invoking crate. That crate may depend on `mold_shape` directly, reach it
/// through the `mold` facade, or be `mold_shape` itself.
///
/// # Example
///
/// ```rust
/// # use mold_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("mold_shape"));
/// ```
///
/// # Resolution rules
///
/// 1. The requested crate is listed in `dependencies`: `::mold_shape`.
/// 2. The requested crate starts with `mold_` and the facade `mold` is listed:
///    `::mold::shape`.
/// 3. Rules 1 and 2 again over `dev-dependencies`.
/// 4. Otherwise `::mold_shape`. A crate naming itself this way needs
///    `extern crate self as mold_shape;` in its root.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let Some(dir) = env::var_os("CARGO_MANIFEST_DIR") else {
            panic!("CARGO_MANIFEST_DIR is not set, the macro must be expanded by cargo");
        };
        let mut path = PathBuf::from(dir);
        path.push("Cargo.toml");
        if !path.exists() {
            panic!("Cargo manifest does not exist at path {}", path.display());
        }
        path
    }

    #[inline(never)]
    fn modified_time(path: &Path) -> SystemTime {
        std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH)
    }

    #[inline(never)]
    fn read(path: &Path) -> Document<Box<str>> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text.into_boxed_str(),
            Err(err) => panic!("Unable to read cargo manifest {}: {err}", path.display()),
        };
        match Document::parse(text) {
            Ok(doc) => doc,
            Err(err) => panic!("Failed to parse cargo manifest {}: {err}", path.display()),
        }
    }

    fn crate_root(name: &str) -> syn::Path {
        let ident = syn::Ident::new(name, Span::call_site());
        let mut path = syn::Path::from(ident);
        path.leading_colon = Some(Default::default());
        path
    }

    fn lookup(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::crate_root(name));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        if deps.contains_key(FACADE_NAME) {
            let mut path = Self::crate_root(FACADE_NAME);
            path.segments
                .push(syn::Ident::new(module, Span::call_site()).into());
            return Some(path);
        }
        None
    }

    /// Return the path of the crate `name` as seen from the caller.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|section| match self.manifest.get(section) {
                Some(Item::Table(deps)) => Self::lookup(deps, name),
                _ => None,
            })
            .next()
            .unwrap_or_else(|| Self::crate_root(name))
    }

    /// Run `func` with the caller's manifest.
    ///
    /// Manifests are cached per path and re-read when the file changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time = Self::modified_time(&path);

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use std::time::SystemTime;
    use toml_edit::Document;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(Box::from(text)).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    fn render(path: &syn::Path) -> String {
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        format!("::{}", segments.join("::"))
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\nmold_shape = \"0.0.1\"\n");
        assert_eq!(render(&m.get_crate_path("mold_shape")), "::mold_shape");
    }

    #[test]
    fn through_facade() {
        let m = manifest("[dependencies]\nmold = \"0.0.1\"\n");
        assert_eq!(render(&m.get_crate_path("mold_shape")), "::mold::shape");
    }

    #[test]
    fn dev_dependency_and_fallback() {
        let m = manifest("[dev-dependencies]\nmold = \"0.0.1\"\n");
        assert_eq!(render(&m.get_crate_path("mold_shape")), "::mold::shape");

        let m = manifest("[package]\nname = \"mold_shape\"\n");
        assert_eq!(render(&m.get_crate_path("mold_shape")), "::mold_shape");
    }
}
