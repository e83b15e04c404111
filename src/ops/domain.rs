use log::debug;

use super::{ModelDocument, OpsError};
use crate::datatype::{base_code, type_identifier};
use crate::document::NodeId;
use crate::tag::Tag;

impl ModelDocument {
    /// Create a domain and return its id.
    pub fn create_domain(&mut self, name: &str, data_type: &str, length: u32) -> Result<String, OpsError> {
        let model = self.editable_model()?;

        let domain_id = self.doc.next_id()?;
        let domain = self.build_basic_node(Tag::Domain, &domain_id, name);
        self.write_domain_type(domain, data_type, length);

        let domains = self.ensure_collection(model, Tag::Domains);
        self.doc.append(domains, domain);

        debug!("created domain {domain_id} ({name:?})");
        Ok(domain_id)
    }

    pub fn update_domain(&mut self, domain_id: &str, name: &str, data_type: &str, length: u32) -> Result<(), OpsError> {
        let model = self.editable_model()?;
        let domain = self.domain_node(model, domain_id)?;

        self.set_field(domain, Tag::Name, name);
        self.write_domain_type(domain, data_type, length);

        debug!("updated domain {domain_id}");
        Ok(())
    }

    /// Remove a domain unless something still references it. Returns whether
    /// the domain was removed.
    pub fn remove_domain(&mut self, domain_id: &str) -> Result<bool, OpsError> {
        let model = self.editable_model()?;
        let domain = self.domain_node(model, domain_id)?;

        let usage = self.doc.usage_count(domain_id);
        if usage > 0 {
            debug!("domain {domain_id} is used {usage} times, keeping it");
            return Ok(false);
        }

        self.doc.remove(domain);
        debug!("removed domain {domain_id}");
        Ok(true)
    }

    fn write_domain_type(&mut self, domain: NodeId, data_type: &str, length: u32) {
        self.set_field(domain, Tag::DataType, &type_identifier(base_code(data_type), length));
        self.set_field(domain, Tag::Length, &length.to_string());
    }
}
