#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_default_file_layout() {
        let config = Config::default();
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.server.session_ttl_secs, 3600);
        assert_eq!(config.server.max_sessions, 10_000);
        assert_eq!(config.data.edge_table, PathBuf::from("file.txt"));
        assert_eq!(config.genome.gene_table_path(), PathBuf::from("data/vaga_proteins.tsv"));
        assert_eq!(config.genome.locus_tag_column, "Locus tag");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 9000

            [genome]
            name = "Adineta_ricciae"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.max_sessions, default_max_sessions());
        assert_eq!(config.genome.name, "Adineta_ricciae");
        assert_eq!(config.genome.fasta, "Adineta_vaga.fna");
        assert_eq!(config.data.hub_image, PathBuf::from("150px-Rotifer-1.jpg"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, default_port());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rotinet.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(|key| match key {
                "ROTINET_PORT" => Some("8600".to_string()),
                "ROTINET_HOST" => Some("0.0.0.0".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.server.port, 8600);
        assert_eq!(config.server.host, "0.0.0.0");

        let bad = config.apply_overrides(|key| (key == "ROTINET_PORT").then(|| "http".to_string()));
        assert!(bad.is_err());
    }

    #[test]
    fn test_base_url() {
        let mut config = Config::default();
        assert_eq!(config.base_url(), "http://localhost:8501");
        config.server.public_base_url = "https://rotinet.example.org/".to_string();
        assert_eq!(config.base_url(), "https://rotinet.example.org");
    }
}
