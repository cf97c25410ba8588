// [libs/infra/vendor-adapter/src/lib.rs]
/*!
 * =================================================================
 * APARATO: VENDOR ADAPTER FLEET (ESTRATO L3)
 * CLASIFICACION: INFRASTRUCTURE LAYER
 * RESPONSABILIDAD: LAS DOS UNICAS IMPLEMENTACIONES DE VendorAdapter
 *
 * `MockAdapter` y `HttpVendorAdapter` son intercambiables: ambas
 * satisfacen `solara_domain_monitoring::VendorAdapter`. Cual de las
 * dos puebla el `AdapterRegistry` lo decide unicamente el proceso que
 * arranca el daemon, nunca el executor.
 * =================================================================
 */

pub mod capabilities;
pub mod errors;
pub mod fixture;
pub mod live;
pub mod mock;

pub use capabilities::capabilities_for;
pub use fixture::FixtureDocument;
pub use live::HttpVendorAdapter;
pub use mock::MockAdapter;
